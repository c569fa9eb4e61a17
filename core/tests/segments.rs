//! Segment and metrics aggregation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use retention_core::{
    config::DashboardConfig,
    metrics::compute_metrics,
    model::{FeatureUsage, Plan, SegmentKind, User},
    segment::{compute_segments, members},
    snapshot::DashboardSnapshot,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
}

fn make_snapshot(seed: u64) -> DashboardSnapshot {
    let config = DashboardConfig::default().with_seed(seed);
    DashboardSnapshot::build_at(&config, as_of()).unwrap()
}

struct UserSpec {
    churn: f64,
    feature1: u8,
    plan: Plan,
    clv: i64,
    signup_hours_ago: i64,
    login_hours_ago: i64,
}

impl Default for UserSpec {
    fn default() -> Self {
        Self {
            churn: 0.2,
            feature1: 50,
            plan: Plan::Pro,
            clv: 7_200,
            signup_hours_ago: 24 * 200,
            login_hours_ago: 24 * 2,
        }
    }
}

fn make_user(id: usize, spec: UserSpec) -> User {
    User {
        id: format!("user-{id}"),
        name: "Alex Chen".into(),
        email: "alex.chen@techflowsolutions.com".into(),
        company: "TechFlow Solutions".into(),
        clv: spec.clv,
        churn_probability: spec.churn,
        last_login: as_of() - Duration::hours(spec.login_hours_ago),
        days_active: 10,
        signup_date: as_of() - Duration::hours(spec.signup_hours_ago),
        plan: spec.plan,
        feature_usage: FeatureUsage {
            feature1: spec.feature1,
            feature2: 0,
            feature3: 0,
        },
        activities: Vec::new(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn four_segments_in_fixed_order() {
    let snapshot = make_snapshot(42);
    let ids: Vec<&str> = snapshot.segments.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["high-risk", "power-users", "new-users", "dormant"]);

    let names: Vec<&str> = snapshot.segments.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["High Risk", "Power Users", "New Users", "Dormant"]);
}

#[test]
fn high_risk_count_matches_population() {
    let snapshot = make_snapshot(1234);

    let expected = snapshot
        .users
        .iter()
        .filter(|u| u.churn_probability > 0.7)
        .count();
    let high_risk = snapshot.segment_by_kind(SegmentKind::HighRisk).unwrap();
    assert_eq!(high_risk.user_count, expected);

    let clvs: Vec<i64> = snapshot
        .users
        .iter()
        .filter(|u| u.churn_probability > 0.7)
        .map(|u| u.clv)
        .collect();
    if clvs.is_empty() {
        assert_eq!(high_risk.avg_clv, None);
    } else {
        let mean = clvs.iter().sum::<i64>() as f64 / clvs.len() as f64;
        assert_eq!(high_risk.avg_clv, Some(mean.round() as i64));
    }
}

#[test]
fn aggregation_is_idempotent_over_a_fixed_population() {
    let snapshot = make_snapshot(555);

    assert_eq!(snapshot.recompute_segments(), snapshot.segments);
    assert_eq!(snapshot.recompute_metrics(), snapshot.metrics);
    assert_eq!(snapshot.recompute_segments(), snapshot.recompute_segments());
}

#[test]
fn predicates_follow_thresholds() {
    let users = vec![
        make_user(0, UserSpec { churn: 0.71, ..Default::default() }),
        make_user(1, UserSpec { churn: 0.70, ..Default::default() }),
        make_user(2, UserSpec { feature1: 81, plan: Plan::Starter, ..Default::default() }),
        make_user(3, UserSpec { feature1: 95, plan: Plan::Enterprise, ..Default::default() }),
        make_user(4, UserSpec { feature1: 80, plan: Plan::Pro, ..Default::default() }),
        make_user(5, UserSpec { signup_hours_ago: 24 * 29, ..Default::default() }),
        make_user(6, UserSpec { login_hours_ago: 24 * 14 + 12, ..Default::default() }),
        make_user(7, UserSpec { login_hours_ago: 24 * 14, ..Default::default() }),
    ];

    let ids = |kind| -> Vec<String> {
        members(kind, &users, as_of())
            .into_iter()
            .map(|u| u.id.clone())
            .collect()
    };

    assert_eq!(ids(SegmentKind::HighRisk), ["user-0"]);
    assert_eq!(ids(SegmentKind::PowerUsers), ["user-2"]);
    assert_eq!(ids(SegmentKind::NewUsers), ["user-5"]);
    // Fractional days: 14.5 days is dormant, exactly 14 is not.
    assert_eq!(ids(SegmentKind::Dormant), ["user-6"]);
}

#[test]
fn dormant_uses_login_not_signup_criteria() {
    // Signed up long ago but logged in yesterday: the descriptive criteria
    // (days since signup >= 14) would include this user; membership does not.
    let users = vec![make_user(0, UserSpec {
        signup_hours_ago: 24 * 300,
        login_hours_ago: 24,
        ..Default::default()
    })];
    let segments = compute_segments(&users, as_of());
    let dormant = segments.iter().find(|s| s.kind == SegmentKind::Dormant).unwrap();

    assert_eq!(dormant.user_count, 0);
    assert_eq!(dormant.criteria.days_since_signup.and_then(|b| b.min), Some(14.0));
}

#[test]
fn empty_segments_show_not_available() {
    let snapshot = DashboardSnapshot::from_users(Vec::new(), as_of(), 0);

    for segment in &snapshot.segments {
        assert_eq!(segment.user_count, 0);
        assert_eq!(segment.avg_clv, None);
        assert_eq!(segment.avg_clv_display(), "N/A");
    }
    assert_eq!(snapshot.metrics.avg_clv, None);
    assert_eq!(snapshot.metrics.active_users, 0);
    assert_eq!(snapshot.metrics.mrr, 0);
    assert_eq!(snapshot.metrics.churn_rate, 0.0);
}

#[test]
fn segment_average_rounds_mean_clv() {
    let users = vec![
        make_user(0, UserSpec { churn: 0.9, clv: 2_000, ..Default::default() }),
        make_user(1, UserSpec { churn: 0.8, clv: 2_001, ..Default::default() }),
    ];
    let segments = compute_segments(&users, as_of());
    assert_eq!(segments[0].user_count, 2);
    assert_eq!(segments[0].avg_clv, Some(2_001)); // 2000.5 rounds up
    assert_eq!(segments[0].avg_clv_display(), "$2,001");
}

#[test]
fn metrics_count_active_users_and_their_revenue() {
    let users = vec![
        make_user(0, UserSpec { plan: Plan::Starter, clv: 2_400, churn: 0.9, ..Default::default() }),
        make_user(1, UserSpec { plan: Plan::Pro, clv: 7_200, ..Default::default() }),
        make_user(2, UserSpec {
            plan: Plan::Enterprise,
            clv: 18_000,
            login_hours_ago: 24 * 20,
            ..Default::default()
        }),
        make_user(3, UserSpec { plan: Plan::Pro, clv: 7_000, ..Default::default() }),
    ];
    let metrics = compute_metrics(&users, as_of());

    assert_eq!(metrics.active_users, 3);
    assert_eq!(metrics.mrr, 200 + 600 + 600);
    assert_eq!(metrics.avg_clv, Some(8_650));
    assert_eq!(metrics.churn_rate, 0.25);
    assert_eq!(metrics.churn_rate_display(), "25.0%");
}

#[test]
fn campaigns_resolve_their_segments() {
    let snapshot = make_snapshot(8);
    for campaign in &snapshot.campaigns {
        let segment = snapshot.segment_for(campaign).unwrap();
        assert_eq!(segment.id, campaign.segment_id);
    }
    assert!(snapshot.segment("vip").is_none());
}
