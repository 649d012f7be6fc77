//! East Africa Time helpers. Every timestamp the service writes is in EAT (UTC+03:00, no DST).

use chrono::{DateTime, FixedOffset, Utc};

const EAT: FixedOffset = match FixedOffset::east_opt(3 * 3600) {
    Some(offset) => offset,
    None => panic!("EAT offset out of range"),
};

pub fn eat() -> FixedOffset {
    EAT
}

pub fn eat_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&eat())
}

/// Human-readable form used by the inventory history, e.g. "March 05, 2025 at 02:30 PM".
pub fn display_date(at: &DateTime<FixedOffset>) -> String {
    at.with_timezone(&eat())
        .format("%B %d, %Y at %I:%M %p")
        .to_string()
}
