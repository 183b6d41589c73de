//! Time windows for the trending and top-prompt rankings.

use chrono::Duration;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Window length used when the client does not supply `period`.
pub const DEFAULT_PERIOD_DAYS: i64 = 7;

/// Longest window a client may request (roughly ten years).
pub const MAX_PERIOD_DAYS: i64 = 3650;

/// Validate a requested window length in days, applying the default.
pub fn validate_period(period: Option<i64>) -> Result<i64, CoreError> {
    let period = period.unwrap_or(DEFAULT_PERIOD_DAYS);
    if !(1..=MAX_PERIOD_DAYS).contains(&period) {
        return Err(CoreError::Validation(format!(
            "period must be between 1 and {MAX_PERIOD_DAYS} days, got {period}"
        )));
    }
    Ok(period)
}

/// Inclusive lower bound of a window of `period_days` ending at `now`.
pub fn window_start(now: Timestamp, period_days: i64) -> Timestamp {
    now - Duration::days(period_days)
}
