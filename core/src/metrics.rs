//! Headline metrics for the dashboard cards.
//!
//! - active users: logged in within the dormancy window (not Dormant)
//! - MRR: monthly plan price summed over active users
//! - avg CLV: rounded mean over the whole population
//! - churn rate: share of the population in High Risk, 3 decimals

use crate::{
    model::{Metrics, SegmentKind, User},
    segment::{matches, mean_rounded},
    types::Timestamp,
};

pub fn compute_metrics(users: &[User], as_of: Timestamp) -> Metrics {
    let active: Vec<&User> = users
        .iter()
        .filter(|u| !matches(SegmentKind::Dormant, u, as_of))
        .collect();

    let mrr: i64 = active.iter().map(|u| u.plan.monthly_price()).sum();
    let clv_sum: i64 = users.iter().map(|u| u.clv).sum();
    let high_risk = users
        .iter()
        .filter(|u| matches(SegmentKind::HighRisk, u, as_of))
        .count();

    let churn_rate = if users.is_empty() {
        0.0
    } else {
        ((high_risk as f64 / users.len() as f64) * 1000.0).round() / 1000.0
    };

    Metrics {
        mrr,
        active_users: active.len(),
        avg_clv: mean_rounded(clv_sum, users.len()),
        churn_rate,
    }
}

impl Metrics {
    /// Churn rate as shown on the card: `6.7%`.
    pub fn churn_rate_display(&self) -> String {
        format!("{:.1}%", self.churn_rate * 100.0)
    }
}
