use sqlx::{Postgres, Transaction};
use time::{Date, OffsetDateTime, Time, UtcOffset};

/// Calendar day a timestamp falls on under the configured local offset.
pub fn local_day(now: OffsetDateTime, tz: UtcOffset) -> Date {
    now.to_offset(tz).date()
}

/// Local midnight as an instant, for `created_at` range filters.
pub fn start_of_day(now: OffsetDateTime, tz: UtcOffset) -> OffsetDateTime {
    now.to_offset(tz).replace_time(Time::MIDNIGHT)
}

/// Takes the next token for `day` from the per-day counter row. The upsert
/// increments and returns in one statement, so two concurrent checkouts can
/// never observe the same value. Runs inside the order-insert transaction: if
/// either side fails, neither the token bump nor the order persists.
pub async fn allocate(tx: &mut Transaction<'_, Postgres>, day: Date) -> anyhow::Result<i32> {
    let token: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO daily_tokens (day, last_token)
        VALUES ($1, 1)
        ON CONFLICT (day) DO UPDATE SET last_token = daily_tokens.last_token + 1
        RETURNING last_token
        "#,
    )
    .bind(day)
    .fetch_one(&mut **tx)
    .await?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset};

    #[test]
    fn orders_around_midnight_fall_on_different_days() {
        let tz = UtcOffset::UTC;
        let late = datetime!(2024-03-10 23:59:59 UTC);
        let early = datetime!(2024-03-11 00:00:01 UTC);
        assert_eq!(local_day(late, tz), date!(2024 - 03 - 10));
        assert_eq!(local_day(early, tz), date!(2024 - 03 - 11));
    }

    #[test]
    fn local_offset_shifts_the_day_boundary() {
        // 19:00 UTC is already past midnight in +05:30.
        let now = datetime!(2024-03-10 19:00:00 UTC);
        assert_eq!(local_day(now, offset!(+5:30)), date!(2024 - 03 - 11));
        assert_eq!(local_day(now, UtcOffset::UTC), date!(2024 - 03 - 10));
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let now = datetime!(2024-03-10 19:00:00 UTC);
        let start = start_of_day(now, offset!(+5:30));
        assert_eq!(start.date(), date!(2024 - 03 - 11));
        assert_eq!(start.time(), Time::MIDNIGHT);
        assert!(start <= now.to_offset(offset!(+5:30)));
    }
}
