//! CLI command implementations.

pub mod analyze;
pub mod categories;
pub mod config;
pub mod prompts;

use chrono::{FixedOffset, Local, Offset, Utc};

/// The UTC offset used for hour/day bucketing: the host's local offset,
/// unless the user asked for UTC.
pub(crate) fn bucket_offset(utc: bool) -> FixedOffset {
    if utc {
        Utc.fix()
    } else {
        *Local::now().offset()
    }
}
