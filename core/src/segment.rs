//! Segment aggregation over a fixed population.
//!
//! Membership is decided by `matches`. The `criteria` attached to each
//! segment is descriptive metadata and is NOT used for membership; for
//! Dormant the two disagree (criteria says days-since-signup >= 14, the
//! predicate is days-since-login > 14). The predicate wins.

use crate::{
    model::{Bounds, Plan, Segment, SegmentCriteria, SegmentKind, User},
    types::Timestamp,
};

pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
pub const POWER_USER_FEATURE_THRESHOLD: u8 = 80;
pub const NEW_USER_DAYS: f64 = 30.0;
pub const DORMANT_DAYS: f64 = 14.0;

/// Authoritative membership test, evaluated relative to `as_of`.
pub fn matches(kind: SegmentKind, user: &User, as_of: Timestamp) -> bool {
    match kind {
        SegmentKind::HighRisk => user.churn_probability > HIGH_RISK_THRESHOLD,
        SegmentKind::PowerUsers => {
            user.feature_usage.feature1 > POWER_USER_FEATURE_THRESHOLD
                && user.plan != Plan::Enterprise
        }
        SegmentKind::NewUsers => user.days_since_signup(as_of) < NEW_USER_DAYS,
        SegmentKind::Dormant => user.days_since_login(as_of) > DORMANT_DAYS,
    }
}

pub fn criteria_for(kind: SegmentKind) -> SegmentCriteria {
    match kind {
        SegmentKind::HighRisk => SegmentCriteria {
            churn_probability: Some(Bounds::min(HIGH_RISK_THRESHOLD)),
            ..Default::default()
        },
        SegmentKind::PowerUsers => SegmentCriteria {
            plan: Some(vec![Plan::Starter, Plan::Pro]),
            ..Default::default()
        },
        SegmentKind::NewUsers => SegmentCriteria {
            days_since_signup: Some(Bounds::max(NEW_USER_DAYS)),
            ..Default::default()
        },
        SegmentKind::Dormant => SegmentCriteria {
            days_since_signup: Some(Bounds::min(DORMANT_DAYS)),
            ..Default::default()
        },
    }
}

/// Build one segment: member count and rounded mean CLV.
pub fn compute_segment(kind: SegmentKind, users: &[User], as_of: Timestamp) -> Segment {
    let (count, clv_sum) = users
        .iter()
        .filter(|u| matches(kind, u, as_of))
        .fold((0usize, 0i64), |(n, sum), u| (n + 1, sum + u.clv));

    let avg_clv = mean_rounded(clv_sum, count);

    log::debug!(
        "segment: {} matched {count} users (avg_clv={:?})",
        kind.id(),
        avg_clv
    );

    Segment {
        id: kind.id().to_string(),
        kind,
        name: kind.name().to_string(),
        description: kind.description().to_string(),
        user_count: count,
        avg_clv,
        criteria: criteria_for(kind),
    }
}

/// All four segments in fixed order: High Risk, Power Users, New Users, Dormant.
pub fn compute_segments(users: &[User], as_of: Timestamp) -> Vec<Segment> {
    SegmentKind::ALL
        .into_iter()
        .map(|kind| compute_segment(kind, users, as_of))
        .collect()
}

/// Users that belong to `kind`, in population order.
pub fn members<'a>(kind: SegmentKind, users: &'a [User], as_of: Timestamp) -> Vec<&'a User> {
    users.iter().filter(|u| matches(kind, u, as_of)).collect()
}

pub fn find_segment<'a>(segments: &'a [Segment], id: &str) -> Option<&'a Segment> {
    segments.iter().find(|s| s.id == id)
}

/// Rounded mean; `None` when there is nothing to average.
pub(crate) fn mean_rounded(sum: i64, count: usize) -> Option<i64> {
    if count == 0 {
        return None;
    }
    Some((sum as f64 / count as f64).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean_rounded(0, 0), None);
        assert_eq!(mean_rounded(5, 2), Some(3));
        assert_eq!(mean_rounded(7_200, 1), Some(7_200));
    }

    #[test]
    fn dormant_criteria_is_metadata_only() {
        let criteria = criteria_for(SegmentKind::Dormant);
        assert_eq!(criteria.days_since_signup, Some(Bounds::min(14.0)));
        assert_eq!(criteria.churn_probability, None);
    }
}
