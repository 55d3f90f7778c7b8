//! Wall-clock helpers in Unix epoch milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" for services that stamp records.
pub type Clock = fn() -> i64;

/// Current wall-clock time in epoch milliseconds.
///
/// Returns `0` if the system clock reads earlier than the Unix epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
