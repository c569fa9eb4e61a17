//! Synthetic user population.
//!
//! Every user is built from independent uniform draws relative to a
//! single reference instant (`as_of`). Identity, dates, plan, CLV, churn
//! noise and feature usage come from the `population` stream; activity
//! logs come from the `activity` stream.

use crate::{
    model::{Activity, ActivityType, FeatureUsage, Plan, User},
    name_generator::NameGenerator,
    rng::{RngBank, StreamRng, StreamSlot},
    types::{whole_days_between, Timestamp, MS_PER_DAY},
};
use chrono::Duration;

pub const DEFAULT_POPULATION_SIZE: usize = 500;
pub const ACTIVITIES_PER_USER: usize = 5;

pub const SIGNUP_WINDOW_DAYS: i64 = 365;
pub const LOGIN_WINDOW_DAYS: i64 = 30;
pub const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// Relative CLV spread around the plan base: ±20%.
pub const CLV_SPREAD: f64 = 0.2;
/// Half-width of the churn noise term.
pub const CHURN_NOISE: f64 = 0.15;
pub const CHURN_FLOOR: f64 = 0.05;
pub const CHURN_CEILING: f64 = 0.95;

pub struct PopulationGenerator {
    as_of: Timestamp,
    population_rng: StreamRng,
    activity_rng: StreamRng,
}

impl PopulationGenerator {
    pub fn new(rng_bank: &RngBank, as_of: Timestamp) -> Self {
        Self {
            as_of,
            population_rng: rng_bank.for_stream(StreamSlot::Population),
            activity_rng: rng_bank.for_stream(StreamSlot::Activity),
        }
    }

    /// Generate `size` users with ids `user-0 .. user-{size-1}`.
    pub fn generate(&mut self, size: usize) -> Vec<User> {
        let users: Vec<User> = (0..size).map(|i| self.generate_user(i)).collect();
        log::debug!(
            "population: generated {} users from streams {}/{}",
            users.len(),
            self.population_rng.name,
            self.activity_rng.name
        );
        users
    }

    fn generate_user(&mut self, index: usize) -> User {
        let rng = &mut self.population_rng;

        let identity = NameGenerator::generate_identity(rng);
        let signup_date = instant_within(rng, self.as_of, SIGNUP_WINDOW_DAYS);
        let last_login = instant_within(rng, self.as_of, LOGIN_WINDOW_DAYS);
        let plan = *rng.pick(&Plan::ALL);

        let base_clv = plan.base_clv() as f64;
        let clv_raw = base_clv + rng.centred(CLV_SPREAD) * base_clv;

        let days_since_signup = whole_days_between(signup_date, self.as_of);
        let days_since_login = whole_days_between(last_login, self.as_of);

        let churn_noise = rng.centred(CHURN_NOISE);
        let churn_probability =
            churn_probability(days_since_login, days_since_signup, clv_raw, base_clv, churn_noise);

        let days_active = (rng.next_f64() * days_since_signup.max(0) as f64).floor() as u32;

        let feature_usage = FeatureUsage {
            feature1: rng.next_u64_below(100) as u8,
            feature2: rng.next_u64_below(100) as u8,
            feature3: rng.next_u64_below(100) as u8,
        };

        let activities = self.generate_activities();

        User {
            id: format!("user-{index}"),
            name: identity.full_name(),
            email: identity.email(),
            company: identity.company.to_string(),
            clv: clv_raw.round() as i64,
            churn_probability,
            last_login,
            days_active,
            signup_date,
            plan,
            feature_usage,
            activities,
        }
    }

    /// The description is picked by a second, independent draw, so it
    /// can disagree with the activity's kind.
    fn generate_activities(&mut self) -> Vec<Activity> {
        let rng = &mut self.activity_rng;
        (0..ACTIVITIES_PER_USER)
            .map(|i| {
                let kind = *rng.pick(&ActivityType::ALL);
                let described_as = *rng.pick(&ActivityType::ALL);
                let timestamp = instant_within(rng, self.as_of, ACTIVITY_WINDOW_DAYS);
                Activity {
                    id: format!("activity-{i}"),
                    kind,
                    description: described_as.description().to_string(),
                    timestamp,
                }
            })
            .collect()
    }
}

/// Additive churn score.
///
/// The 7-day and 14-day inactivity terms both apply past 14 days.
/// `noise` is expected in [-CHURN_NOISE, CHURN_NOISE).
pub fn churn_probability(
    days_since_login: i64,
    days_since_signup: i64,
    clv_raw: f64,
    base_clv: f64,
    noise: f64,
) -> f64 {
    let mut score = 0.0;
    if days_since_login > 14 {
        score += 0.4;
    }
    if days_since_login > 7 {
        score += 0.2;
    }
    if clv_raw < base_clv * 0.8 {
        score += 0.2;
    }
    if days_since_signup < 30 {
        score += 0.1;
    }
    round_to_cents((score + noise).clamp(CHURN_FLOOR, CHURN_CEILING))
}

/// Round to two decimals.
pub fn round_to_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// A uniformly random instant in `(as_of - window_days, as_of]`.
fn instant_within(rng: &mut StreamRng, as_of: Timestamp, window_days: i64) -> Timestamp {
    let offset_ms = (rng.next_f64() * (window_days * MS_PER_DAY) as f64) as i64;
    as_of - Duration::milliseconds(offset_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactivity_terms_stack_past_two_weeks() {
        // 0.4 + 0.2, no noise
        assert_eq!(churn_probability(20, 200, 7_200.0, 7_200.0, 0.0), 0.6);
        // only the 7-day term
        assert_eq!(churn_probability(10, 200, 7_200.0, 7_200.0, 0.0), 0.2);
    }

    #[test]
    fn score_is_clamped() {
        // 0.4 + 0.2 + 0.2 + 0.1 + 0.14 = 1.04
        assert_eq!(churn_probability(20, 5, 1_000.0, 2_400.0, 0.14), 0.95);
        assert_eq!(churn_probability(0, 200, 2_400.0, 2_400.0, -0.15), 0.05);
    }

    #[test]
    fn low_clv_and_new_signup_add_risk() {
        assert_eq!(churn_probability(0, 10, 1_900.0, 2_400.0, 0.0), 0.3);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_to_cents(0.123), 0.12);
        assert_eq!(round_to_cents(0.125_000_1), 0.13);
    }
}
