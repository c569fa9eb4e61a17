//! Shared primitive types used across the dashboard core.

use chrono::{DateTime, Utc};

/// Wall-clock instant. All timestamps in the snapshot are UTC.
pub type Timestamp = DateTime<Utc>;

/// Stable identifier of a user (`user-{index}`).
pub type UserId = String;

/// Stable identifier of a segment (`high-risk`, `dormant`, ...).
pub type SegmentId = String;

/// Stable identifier of a campaign.
pub type CampaignId = String;

/// Milliseconds in one day, used for fractional day arithmetic.
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Fractional days elapsed between `earlier` and `as_of`.
pub fn days_between(earlier: Timestamp, as_of: Timestamp) -> f64 {
    (as_of - earlier).num_milliseconds() as f64 / MS_PER_DAY as f64
}

/// Whole days elapsed between `earlier` and `as_of`, rounded down.
pub fn whole_days_between(earlier: Timestamp, as_of: Timestamp) -> i64 {
    days_between(earlier, as_of).floor() as i64
}
