use chrono::{DateTime, Utc};

pub mod events;
pub mod locations;
pub mod movies;
pub mod reviews;
pub mod trails;
pub mod weather;

/// Parse a stored RFC 3339 timestamp. A cell that fails to parse maps to
/// the epoch so the row reads as maximally old and ages out as stale
/// instead of wedging its kind+key.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map_or(DateTime::<Utc>::UNIX_EPOCH, |t| t.with_timezone(&Utc))
}
