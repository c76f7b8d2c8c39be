mod controller;

pub use controller::{AuthState, SessionController, SessionError, Surface};
