use std::fmt;

use crate::models::{Booking, EventBooking, RestaurantBooking, ScanOutcome};

use super::status::{
    format_date, format_date_time, format_date_time_in, readable_label, status_label, status_tone,
    Tone, NOT_AVAILABLE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// Everything a booking details screen shows for one scan outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub heading: String,
    pub rows: Vec<DetailRow>,
    pub status: String,
    pub subheading: String,
    pub title: &'static str,
    pub tone: Tone,
}

fn row(label: &'static str, value: impl Into<String>) -> DetailRow {
    DetailRow {
        label,
        value: value.into(),
    }
}

fn or_na(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

impl BookingDetails {
    /// Build the card for `outcome`, dispatching on the booking variant only
    pub fn from_outcome(outcome: &ScanOutcome) -> Self {
        let data = &outcome.data;
        let status = status_label(data);
        let tone = status_tone(&status);
        // Restaurant scans are shown in the venue's own zone
        let zone = match &data.booking {
            Booking::Restaurant(booking) => Some(booking.timezone.as_str()),
            _ => None,
        };
        let scanned_at = row(
            "Scanned At",
            format_date_time_in(data.qr_code.scanned_at.as_deref(), zone),
        );

        let (title, heading, subheading, mut rows) = match &data.booking {
            Booking::Event(booking) => event_card(booking),
            Booking::Restaurant(booking) => restaurant_card(booking),
            Booking::Other { booking_type, raw } => {
                let id = raw.get("id").and_then(|v| v.as_str());
                (
                    "Booking Details",
                    readable_label(booking_type),
                    String::new(),
                    vec![row("Booking ID", or_na(id))],
                )
            }
        };

        rows.push(row("Status", status.clone()));
        rows.push(row("QR Code", data.qr_code.id.clone()));
        rows.push(scanned_at);

        Self {
            heading,
            rows,
            status,
            subheading,
            title,
            tone,
        }
    }
}

fn event_card(booking: &EventBooking) -> (&'static str, String, String, Vec<DetailRow>) {
    let heading = or_na(booking.event_name());
    let subheading = format!(
        "{} · {}",
        format_date_time(booking.show_date_time()),
        or_na(booking.hall_name())
    );

    let rows = vec![
        row("Booking Number", booking.booking_number.clone()),
        row("Customer", booking.customer_name().unwrap_or_else(|| NOT_AVAILABLE.to_string())),
        row(
            "Email",
            or_na(booking.user.as_ref().and_then(|u| u.email.as_deref())),
        ),
        row("Section", or_na(booking.section_name())),
        row("Seats", booking.seat_count().to_string()),
        row(
            "Total",
            format!("{} {}", booking.total_amount, booking.currency),
        ),
    ];

    ("Booking Details", heading, subheading, rows)
}

fn restaurant_card(booking: &RestaurantBooking) -> (&'static str, String, String, Vec<DetailRow>) {
    let heading = or_na(booking.customer_name.as_deref());
    let subheading = format!(
        "{} · {}",
        readable_label(&booking.slot_type),
        booking.slot_time
    );

    let rows = vec![
        row("Booking Date", format_date(Some(booking.booking_date.as_str()))),
        row("Slot", readable_label(&booking.slot_type)),
        row("Time", booking.slot_time.clone()),
        row("Guests", booking.number_of_people.to_string()),
        row("Phone", or_na(booking.customer_phone.as_deref())),
        row("Email", or_na(booking.customer_email.as_deref())),
        row("Timezone", or_na(Some(booking.timezone.as_str()))),
    ];

    ("Restaurant Booking", heading, subheading, rows)
}

impl fmt::Display for BookingDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.label.len())
            .max()
            .unwrap_or_default();

        writeln!(f, "{} [{}]", self.title, self.status)?;
        writeln!(f, "{}", self.heading)?;
        if !self.subheading.is_empty() {
            writeln!(f, "{}", self.subheading)?;
        }
        for r in &self.rows {
            writeln!(f, "  {:<width$}  {}", r.label, r.value)?;
        }
        Ok(())
    }
}
