//! Time and timestamp helpers.

use chrono::{DateTime, Duration, SubsecRound, Utc};

/// UTC timestamp used for `created_at`, `scheduled_at`, session expiry, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to microseconds so that it
/// survives a round-trip through storage unchanged.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Return `from` shifted forward by `hours`, saturating at the latest
/// representable instant.
#[must_use]
pub fn hours_after(from: Timestamp, hours: u32) -> Timestamp {
    from.checked_add_signed(Duration::hours(i64::from(hours)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
