use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request body for owner login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub passcode: String,
}

/// Session token returned on successful login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    #[serde(rename = "expiresAt", with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}
