//! Shared test helpers for the crate's `#[cfg(test)]` modules

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use crate::api::{AuthApi, AuthError, ScanApi, ScanError};
use crate::models::{Credentials, ScanOutcome, TokenPair};
use crate::storage::{MemoryTokenStore, StoreError, TokenKind, TokenStore};

// ============================================================================
// Token store that always fails
// ============================================================================

pub struct FailingTokenStore;

#[async_trait]
impl TokenStore for FailingTokenStore {
    async fn save(&self, _kind: TokenKind, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk full".to_string()))
    }

    async fn get(&self, _kind: TokenKind) -> Result<Option<String>, StoreError> {
        Err(StoreError::Backend("disk unreadable".to_string()))
    }

    async fn clear(&self, _kind: TokenKind) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk read-only".to_string()))
    }
}

/// In-memory store whose writes and clears fail for one token kind only
pub struct OneKindFailingStore {
    pub failing: TokenKind,
    pub inner: MemoryTokenStore,
}

impl OneKindFailingStore {
    pub fn new(failing: TokenKind) -> Self {
        Self {
            failing,
            inner: MemoryTokenStore::new(),
        }
    }
}

#[async_trait]
impl TokenStore for OneKindFailingStore {
    async fn save(&self, kind: TokenKind, value: &str) -> Result<(), StoreError> {
        if kind == self.failing {
            return Err(StoreError::Backend(format!("{kind:?} write rejected")));
        }
        self.inner.save(kind, value).await
    }

    async fn get(&self, kind: TokenKind) -> Result<Option<String>, StoreError> {
        self.inner.get(kind).await
    }

    async fn clear(&self, kind: TokenKind) -> Result<(), StoreError> {
        if kind == self.failing {
            return Err(StoreError::Backend(format!("{kind:?} clear rejected")));
        }
        self.inner.clear(kind).await
    }
}

// ============================================================================
// Scripted auth backend
// ============================================================================

fn status_error(status: u16, message: &str) -> AuthError {
    AuthError::Status {
        status,
        message: message.to_string(),
    }
}

/// `AuthApi` with fixed answers and call accounting.
///
/// Unscripted calls fail with a 500.
pub struct StubAuth {
    last_refresh: Mutex<Option<(String, String)>>,
    last_username: Mutex<Option<String>>,
    login: Result<TokenPair, (u16, String)>,
    login_calls: AtomicUsize,
    refresh: Result<String, (u16, String)>,
    refresh_calls: AtomicUsize,
}

impl StubAuth {
    pub fn new() -> Self {
        Self {
            last_refresh: Mutex::new(None),
            last_username: Mutex::new(None),
            login: Err((500, "login not scripted".to_string())),
            login_calls: AtomicUsize::new(0),
            refresh: Err((500, "refresh not scripted".to_string())),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_login_tokens(mut self, access: &str, refresh: &str) -> Self {
        self.login = Ok(TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        });
        self
    }

    pub fn fail_login(mut self, status: u16, message: &str) -> Self {
        self.login = Err((status, message.to_string()));
        self
    }

    pub fn with_refreshed_token(mut self, access: &str) -> Self {
        self.refresh = Ok(access.to_string());
        self
    }

    pub fn fail_refresh(mut self, status: u16, message: &str) -> Self {
        self.refresh = Err((status, message.to_string()));
        self
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn last_username(&self) -> Option<String> {
        self.last_username.lock().unwrap().clone()
    }

    pub fn last_refresh_pair(&self) -> Option<(String, String)> {
        self.last_refresh.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthApi for StubAuth {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_username.lock().unwrap() = Some(credentials.username.clone());
        self.login
            .clone()
            .map_err(|(status, message)| status_error(status, &message))
    }

    async fn refresh(&self, access_token: &str, refresh_token: &str) -> Result<String, AuthError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_refresh.lock().unwrap() =
            Some((access_token.to_string(), refresh_token.to_string()));
        self.refresh
            .clone()
            .map_err(|(status, message)| status_error(status, &message))
    }
}

// ============================================================================
// Scripted scan backend
// ============================================================================

/// `ScanApi` answering from a queue, recording every token it was given.
///
/// With a gate installed, each call waits for `Notify::notify_one` before
/// answering.
pub struct StubScanner {
    gate: Option<Arc<Notify>>,
    payloads: Mutex<Vec<String>>,
    responses: Mutex<VecDeque<Result<ScanOutcome, ScanError>>>,
    tokens: Mutex<Vec<String>>,
}

impl StubScanner {
    pub fn new() -> Self {
        Self {
            gate: None,
            payloads: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn then_ok(self, outcome: ScanOutcome) -> Self {
        self.responses.lock().unwrap().push_back(Ok(outcome));
        self
    }

    pub fn then_err(self, error: ScanError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScanApi for StubScanner {
    async fn scan(&self, payload: &str, access_token: &str) -> Result<ScanOutcome, ScanError> {
        self.payloads.lock().unwrap().push(payload.to_string());
        self.tokens.lock().unwrap().push(access_token.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Err(ScanError::Status {
                status: 500,
                message: "no scripted response".to_string(),
            })
        })
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Wire body of a successful event-booking scan
pub fn event_outcome_json(booking_number: &str) -> serde_json::Value {
    json!({
        "success": true,
        "message": "QR code validated",
        "data": {
            "qrCode": {"id": "qr-1", "isScanned": true, "scannedAt": "2026-10-14T13:45:00Z"},
            "bookingType": "event",
            "isValid": true,
            "isExpired": false,
            "booking": {
                "id": "b-1",
                "bookingNumber": booking_number,
                "status": "confirmed",
                "totalAmount": "450.00",
                "currency": "INR",
                "bookingItems": [
                    {"id": "i1", "quantity": 3, "price": "150.00", "totalPrice": "450.00"}
                ],
                "user": {"firstName": "Asha", "lastName": "Rao", "email": "asha@example.com"},
                "showInstance": {
                    "showDateTime": "2026-10-14T19:30:00+05:30",
                    "hall": {"name": "Audi 3"},
                    "event": {"name": "Night Premiere"}
                },
                "section": {"name": "Gold"}
            }
        },
        "meta": {"timestamp": "2026-10-14T13:45:01Z"}
    })
}

pub fn event_outcome(booking_number: &str) -> ScanOutcome {
    serde_json::from_value(event_outcome_json(booking_number)).unwrap()
}

/// Wire body of a successful restaurant scan with the given flags and status
pub fn restaurant_outcome_json(is_valid: bool, is_expired: bool, status: &str) -> serde_json::Value {
    json!({
        "success": true,
        "message": "QR code validated",
        "data": {
            "qrCode": {"id": "qr-2", "isScanned": false, "scannedAt": null},
            "bookingType": "restaurant",
            "isValid": is_valid,
            "isExpired": is_expired,
            "booking": {
                "id": "r-1",
                "restaurantId": "rest-9",
                "userId": "u-1",
                "bookingDate": "2026-10-14",
                "slotType": "LATE_DINNER",
                "slotTime": "21:30",
                "bookingTimeInUTC": "2026-10-14T16:00:00Z",
                "timezone": "Asia/Kolkata",
                "numberOfPeople": 4,
                "status": status,
                "customerName": "Ravi Kumar",
                "customerPhone": "+91 98765 43210",
                "customerEmail": null
            }
        }
    })
}

pub fn restaurant_outcome(is_valid: bool, is_expired: bool, status: &str) -> ScanOutcome {
    serde_json::from_value(restaurant_outcome_json(is_valid, is_expired, status)).unwrap()
}
