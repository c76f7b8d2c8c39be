//! Display logic for scan results: labels, palettes and detail rows.
//! Nothing here holds state or performs I/O.

pub mod details;
pub mod status;

pub use details::{BookingDetails, DetailRow};
pub use status::{
    format_date, format_date_time, format_date_time_in, readable_label, status_colors,
    status_label, status_tone, StatusColors, Tone,
};
