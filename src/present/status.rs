use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::models::ScanData;

pub const LABEL_EXPIRED: &str = "Expired";
pub const LABEL_INVALID: &str = "Invalid";
pub const NOT_AVAILABLE: &str = "N/A";

/// Badge palette for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusColors {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Warning,
    Negative,
}

impl Tone {
    pub fn colors(self) -> StatusColors {
        match self {
            Tone::Positive => StatusColors {
                background: "rgba(34, 197, 94, 0.18)",
                border: "rgba(34, 197, 94, 0.5)",
                text: "#4ade80",
            },
            Tone::Warning => StatusColors {
                background: "rgba(234, 179, 8, 0.18)",
                border: "rgba(234, 179, 8, 0.5)",
                text: "#fbbf24",
            },
            Tone::Negative => StatusColors {
                background: "rgba(248, 113, 113, 0.2)",
                border: "rgba(248, 113, 113, 0.45)",
                text: "#f87171",
            },
        }
    }
}

/// Label shown on the booking badge.
///
/// Validity wins over expiry, expiry wins over the booking's own status.
/// A blank booking status yields an empty label.
pub fn status_label(data: &ScanData) -> String {
    if !data.is_valid {
        return LABEL_INVALID.to_string();
    }
    if data.is_expired {
        return LABEL_EXPIRED.to_string();
    }

    data.booking.status().map(readable_label).unwrap_or_default()
}

pub fn status_tone(label: &str) -> Tone {
    if label.eq_ignore_ascii_case("confirmed") {
        Tone::Positive
    } else if label.eq_ignore_ascii_case(LABEL_EXPIRED) {
        Tone::Warning
    } else {
        Tone::Negative
    }
}

pub fn status_colors(label: &str) -> StatusColors {
    status_tone(label).colors()
}

/// `LATE_DINNER` -> `Late Dinner`, `confirmed` -> `Confirmed`
pub fn readable_label(value: &str) -> String {
    value
        .replace('_', " ")
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Calendar date as `Wed, 14 Oct 2026`.
///
/// Accepts `YYYY-MM-DD` or RFC 3339; anything else is shown verbatim.
pub fn format_date(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    const DATE_FORMAT: &str = "%a, %d %b %Y";
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format(DATE_FORMAT).to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return timestamp.format(DATE_FORMAT).to_string();
    }
    value.to_string()
}

/// Point in time as `14 Oct 2026, 07:30 PM +05:30`, kept in the offset it
/// was sent with (`UTC` for a zero offset). Naive timestamps get no suffix.
pub fn format_date_time(value: Option<&str>) -> String {
    format_date_time_in(value, None)
}

/// Like [`format_date_time`], but an RFC 3339 instant is shown in the IANA
/// zone `timezone` (`14 Oct 2026, 08:05 PM IST`). An unknown or blank zone
/// falls back to the offset the timestamp carries.
pub fn format_date_time_in(value: Option<&str>, timezone: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    const DATE_TIME_FORMAT: &str = "%d %b %Y, %I:%M %p";
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        if let Some(zone) = timezone.and_then(|z| z.trim().parse::<Tz>().ok()) {
            return timestamp
                .with_timezone(&zone)
                .format("%d %b %Y, %I:%M %p %Z")
                .to_string();
        }

        let rendered = timestamp.format(DATE_TIME_FORMAT);
        return if timestamp.offset().local_minus_utc() == 0 {
            format!("{rendered} UTC")
        } else {
            format!("{rendered} {}", timestamp.format("%:z"))
        };
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return naive.format(DATE_TIME_FORMAT).to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::restaurant_outcome;

    #[test]
    fn test_status_label_precedence() {
        assert_eq!(status_label(&restaurant_outcome(false, true, "confirmed").data), "Invalid");
        assert_eq!(status_label(&restaurant_outcome(true, true, "confirmed").data), "Expired");
        assert_eq!(status_label(&restaurant_outcome(true, false, "confirmed").data), "Confirmed");
        assert_eq!(
            status_label(&restaurant_outcome(true, false, "checked_in").data),
            "Checked In"
        );
        assert_eq!(status_label(&restaurant_outcome(true, false, "").data), "");
    }

    #[test]
    fn test_tone_by_label() {
        assert_eq!(status_tone("Confirmed"), Tone::Positive);
        assert_eq!(status_tone("expired"), Tone::Warning);
        assert_eq!(status_tone("Invalid"), Tone::Negative);
        assert_eq!(status_tone("Pending"), Tone::Negative);
        assert_eq!(status_colors("Confirmed").text, "#4ade80");
        assert_eq!(status_colors("Cancelled").border, "rgba(248, 113, 113, 0.45)");
    }

    #[test]
    fn test_readable_label() {
        assert_eq!(readable_label("LATE_DINNER"), "Late Dinner");
        assert_eq!(readable_label("  pending  "), "Pending");
        assert_eq!(readable_label("no__show"), "No Show");
        assert_eq!(readable_label(""), "");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2026-10-14")), "Wed, 14 Oct 2026");
        assert_eq!(format_date(Some("2026-10-14T19:30:00+05:30")), "Wed, 14 Oct 2026");
        assert_eq!(format_date(Some("next tuesday")), "next tuesday");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(
            format_date_time(Some("2026-10-14T13:45:00Z")),
            "14 Oct 2026, 01:45 PM UTC"
        );
        assert_eq!(
            format_date_time(Some("2026-10-14T19:30:00+05:30")),
            "14 Oct 2026, 07:30 PM +05:30"
        );
        assert_eq!(
            format_date_time(Some("2026-10-14T08:05:00")),
            "14 Oct 2026, 08:05 AM"
        );
        assert_eq!(format_date_time(Some("soon")), "soon");
        assert_eq!(format_date_time(None), "N/A");
    }

    #[test]
    fn test_format_date_time_in_zone() {
        let scanned = Some("2026-10-14T14:35:00Z");
        assert_eq!(
            format_date_time_in(scanned, Some("Asia/Kolkata")),
            "14 Oct 2026, 08:05 PM IST"
        );
        assert_eq!(
            format_date_time_in(scanned, Some("America/New_York")),
            "14 Oct 2026, 10:35 AM EDT"
        );
        assert_eq!(
            format_date_time_in(Some("2026-10-14T19:30:00+05:30"), Some("Europe/London")),
            "14 Oct 2026, 03:00 PM BST"
        );
    }

    #[test]
    fn test_format_date_time_in_unknown_zone_falls_back() {
        let scanned = Some("2026-10-14T14:35:00Z");
        assert_eq!(
            format_date_time_in(scanned, Some("Mars/Olympus")),
            "14 Oct 2026, 02:35 PM UTC"
        );
        assert_eq!(format_date_time_in(scanned, Some("  ")), "14 Oct 2026, 02:35 PM UTC");
        assert_eq!(format_date_time_in(None, Some("Asia/Kolkata")), "N/A");
        assert_eq!(format_date_time_in(Some("soon"), Some("Asia/Kolkata")), "soon");
        assert_eq!(
            format_date_time_in(Some("2026-10-14T08:05:00"), Some("Asia/Kolkata")),
            "14 Oct 2026, 08:05 AM"
        );
    }
}
