use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::config::JwtConfig;
use crate::state::AppState;

/// Session payload. There is a single subject (the owner), so the claims carry
/// no user id — just the standard registered fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
    pub aud: String,
}

pub const OWNER_SUBJECT: &str = "owner";

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl SessionKeys {
    /// Signs an owner session token; also returns its expiry instant.
    pub fn sign(&self) -> anyhow::Result<(String, OffsetDateTime)> {
        let now = OffsetDateTime::now_utc();
        let expires_at = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: OWNER_SUBJECT.into(),
            iat: now.unix_timestamp() as usize,
            exp: expires_at.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!("owner session signed");
        Ok((token, expires_at))
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        if data.claims.sub != OWNER_SUBJECT {
            anyhow::bail!("not an owner session token");
        }
        debug!("owner session verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(issuer: &str, audience: &str) -> SessionKeys {
        let mut state = AppState::fake();
        let mut config = (*state.config).clone();
        config.jwt.issuer = issuer.into();
        config.jwt.audience = audience.into();
        state.config = std::sync::Arc::new(config);
        SessionKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrip() {
        let keys = make_keys("test-issuer", "test-aud");
        let (token, expires_at) = keys.sign().expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, OWNER_SUBJECT);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.exp as i64, expires_at.unix_timestamp());
    }

    #[tokio::test]
    async fn expiry_honors_configured_ttl() {
        let keys = make_keys("iss", "aud");
        let (_, expires_at) = keys.sign().expect("sign");
        let expected = OffsetDateTime::now_utc() + TimeDuration::minutes(5);
        assert!((expires_at - expected).whole_seconds().abs() <= 1);
    }

    #[tokio::test]
    async fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys("good-iss", "good-aud");
        let bad = make_keys("bad-iss", "bad-aud");
        let (token, _) = good.sign().expect("sign");
        assert!(bad.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_tampered_token() {
        let keys = make_keys("iss", "aud");
        let (token, _) = keys.sign().expect("sign");
        let mut tampered = token;
        tampered.push('x');
        assert!(keys.verify(&tampered).is_err());
    }
}
