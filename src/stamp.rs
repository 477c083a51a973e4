//! Runtime-generated request values: partner reference numbers and zoned
//! timestamps for `validUpTo`-style fields.

use chrono::{Duration, FixedOffset, Utc};
use std::sync::LazyLock;
use uuid::Uuid;

/// Jakarta offset in whole hours (UTC+7), the sandbox's home zone.
pub const JAKARTA_UTC_OFFSET: i32 = 7;

static JAKARTA: LazyLock<FixedOffset> =
    LazyLock::new(|| FixedOffset::east_opt(JAKARTA_UTC_OFFSET * 3600).unwrap());

/// A fresh partner reference number. Every order submission needs a unique
/// one; reusing a reference is itself a test case, not the default.
pub fn partner_reference_no() -> String {
    Uuid::new_v4().to_string()
}

/// Formats now plus `offset_seconds` as `YYYY-MM-DDTHH:MM:SS+HH:00` in the
/// given whole-hour zone. Zone offsets outside the valid range fall back to
/// Jakarta time; second offsets the clock cannot represent leave it
/// unshifted.
pub fn formatted_date(offset_seconds: i64, tz_offset_hours: i32) -> String {
    let zone = tz_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or(*JAKARTA);
    let now = Utc::now().with_timezone(&zone);
    let target = Duration::try_seconds(offset_seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(now);
    target.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
