use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Current time at millisecond precision, the resolution the document store
/// keeps. Values written and read back compare equal.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// The `updatedAt` to stamp on a successful update.
///
/// Never earlier than `now`, and always strictly after `previous`, even when
/// two writes land inside the same millisecond.
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + Duration::milliseconds(1))
}
