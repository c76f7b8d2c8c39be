use serde::Deserialize;

use super::booking::Booking;

/// Response body of a QR validation call. Immutable once received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanOutcome {
    pub data: ScanData,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub meta: Option<ScanMeta>,
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScanMeta {
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Validation result for one QR code.
///
/// `booking` is decoded according to `booking_type` at deserialization time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawScanData")]
pub struct ScanData {
    pub booking: Booking,
    pub booking_type: String,
    pub is_expired: bool,
    pub is_valid: bool,
    pub qr_code: QrCode,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: String,
    pub is_scanned: bool,
    #[serde(default)]
    pub scanned_at: Option<String>,
}

/// Wire shape of `data` before the booking is dispatched on its tag
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScanData {
    booking: serde_json::Value,
    booking_type: String,
    is_expired: bool,
    is_valid: bool,
    qr_code: QrCode,
}

impl TryFrom<RawScanData> for ScanData {
    type Error = serde_json::Error;

    fn try_from(raw: RawScanData) -> Result<Self, Self::Error> {
        let booking = Booking::from_tagged(&raw.booking_type, raw.booking)?;
        Ok(Self {
            booking,
            booking_type: raw.booking_type,
            is_expired: raw.is_expired,
            is_valid: raw.is_valid,
            qr_code: raw.qr_code,
        })
    }
}
