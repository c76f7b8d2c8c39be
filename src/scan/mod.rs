mod flow;

pub use flow::{FlowError, ScanFlow};
