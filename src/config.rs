use anyhow::Context;
use serde::Deserialize;
use time::UtcOffset;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Argon2 PHC string for the owner passcode.
    pub owner_passcode_hash: String,
    /// Out-of-band shared secret for the destructive reset endpoint.
    pub admin_reset_token: String,
    /// Local offset used for daily token numbering and `date=today` filters.
    pub tz_offset: UtcOffset,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is required")?;

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is required")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "eatya".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "eatya-owner".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(12 * 60),
        };

        let owner_passcode_hash = match std::env::var("OWNER_PASSCODE_HASH") {
            Ok(hash) => hash,
            Err(_) => {
                let plain = std::env::var("OWNER_PASSCODE")
                    .context("OWNER_PASSCODE_HASH or OWNER_PASSCODE is required")?;
                crate::auth::password::hash_password(&plain)?
            }
        };

        let admin_reset_token =
            std::env::var("ADMIN_RESET_TOKEN").context("ADMIN_RESET_TOKEN is required")?;

        let tz_offset = match std::env::var("TIMEZONE_OFFSET") {
            Ok(raw) => parse_offset(&raw).context("invalid TIMEZONE_OFFSET")?,
            Err(_) => UtcOffset::UTC,
        };

        Ok(Self {
            database_url,
            jwt,
            owner_passcode_hash,
            admin_reset_token,
            tz_offset,
        })
    }
}

/// Parses offsets of the form `+05:30`, `-07:00` or plain `5`.
fn parse_offset(raw: &str) -> anyhow::Result<UtcOffset> {
    let (sign, rest): (i8, &str) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };
    let mut parts = rest.splitn(2, ':');
    let hours: i8 = parts.next().unwrap_or("0").trim().parse()?;
    let minutes: i8 = match parts.next() {
        Some(m) => m.trim().parse()?,
        None => 0,
    };
    Ok(UtcOffset::from_hms(sign * hours, sign * minutes, 0)?)
}
