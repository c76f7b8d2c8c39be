use serde::{Deserialize, Serialize};

/// Booking attached to a scanned QR code, selected by the `bookingType` tag
#[derive(Debug, Clone, PartialEq)]
pub enum Booking {
    Event(EventBooking),
    Restaurant(RestaurantBooking),
    /// A tag this client does not know; the raw booking is kept for display
    Other {
        booking_type: String,
        raw: serde_json::Value,
    },
}

impl Booking {
    pub const EVENT: &'static str = "event";
    pub const RESTAURANT: &'static str = "restaurant";

    /// Decode `raw` as the variant named by `booking_type`.
    ///
    /// The tag alone picks the variant. A known tag whose payload does not
    /// match its shape is an error, never a fallback to another variant.
    pub fn from_tagged(booking_type: &str, raw: serde_json::Value) -> Result<Self, serde_json::Error> {
        let tag = booking_type.trim();
        if tag.eq_ignore_ascii_case(Self::EVENT) {
            Ok(Booking::Event(serde_json::from_value(raw)?))
        } else if tag.eq_ignore_ascii_case(Self::RESTAURANT) {
            Ok(Booking::Restaurant(serde_json::from_value(raw)?))
        } else {
            Ok(Booking::Other {
                booking_type: booking_type.to_string(),
                raw,
            })
        }
    }

    /// Free-form booking status as sent by the backend, if the variant has one
    pub fn status(&self) -> Option<&str> {
        match self {
            Booking::Event(b) => Some(b.status.as_str()),
            Booking::Restaurant(b) => Some(b.status.as_str()),
            Booking::Other { raw, .. } => raw.get("status").and_then(|s| s.as_str()),
        }
    }
}

/// Ticketed-show booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBooking {
    #[serde(default)]
    pub booking_items: Option<Vec<BookingItem>>,
    pub booking_number: String,
    pub currency: String,
    pub id: String,
    #[serde(default)]
    pub section: Option<NamedRef>,
    #[serde(default)]
    pub show_instance: Option<ShowInstance>,
    /// Typically one of confirmed / cancelled / pending
    pub status: String,
    /// Decimal amount as a string, exactly as the backend formats it
    pub total_amount: String,
    #[serde(default)]
    pub user: Option<BookingUser>,
}

impl EventBooking {
    /// Total number of admitted seats across all line items
    pub fn seat_count(&self) -> u32 {
        self.booking_items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|item| item.quantity)
            .sum()
    }

    pub fn event_name(&self) -> Option<&str> {
        self.show_instance
            .as_ref()
            .and_then(|s| s.event.as_ref())
            .and_then(|e| e.name.as_deref())
    }

    pub fn hall_name(&self) -> Option<&str> {
        self.show_instance
            .as_ref()
            .and_then(|s| s.hall.as_ref())
            .and_then(|h| h.name.as_deref())
    }

    pub fn show_date_time(&self) -> Option<&str> {
        self.show_instance
            .as_ref()
            .and_then(|s| s.show_date_time.as_deref())
    }

    pub fn section_name(&self) -> Option<&str> {
        self.section.as_ref().and_then(|s| s.name.as_deref())
    }

    /// "First Last", skipping missing parts; `None` when both are missing
    pub fn customer_name(&self) -> Option<String> {
        let user = self.user.as_ref()?;
        let parts: Vec<&str> = [user.first_name.as_deref(), user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    pub id: String,
    pub price: String,
    pub quantity: u32,
    pub total_price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowInstance {
    #[serde(default)]
    pub event: Option<NamedRef>,
    #[serde(default)]
    pub hall: Option<NamedRef>,
    #[serde(default)]
    pub show_date_time: Option<String>,
}

/// A nested `{ name }` reference (hall, section, event)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// Restaurant table reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantBooking {
    pub booking_date: String,
    #[serde(rename = "bookingTimeInUTC", default)]
    pub booking_time_in_utc: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub id: String,
    pub number_of_people: u32,
    pub restaurant_id: String,
    pub slot_time: String,
    pub slot_type: String,
    pub status: String,
    /// IANA zone name the restaurant operates in
    pub timezone: String,
    #[serde(default)]
    pub user_id: Option<String>,
}
