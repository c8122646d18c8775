mod catalog;
mod chat;
mod enrollment;
mod tenant;

pub use catalog::*;
pub use chat::*;
pub use enrollment::*;
pub use tenant::*;

use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(ts, 0).unwrap()
}

pub(crate) fn datetime_to_timestamp(dt: DateTime<Utc>) -> i64 {
    dt.timestamp()
}
