//! Canned recommendation and message selection.
//!
//! Nothing here learns or infers; every answer is a table lookup keyed
//! by simple thresholds or by a (segment, channel) pair.

use crate::model::{AiRecommendation, Channel, SegmentKind, User};
use std::time::Duration;

pub const CHECK_IN_CHURN_THRESHOLD: f64 = 0.7;
pub const TUTORIAL_FEATURE_THRESHOLD: u8 = 30;

pub const FALLBACK_MESSAGE: &str =
    "Personalized message will be generated based on user behavior and preferences.";

pub const GENERATION_DELAY: Duration = Duration::from_millis(1_500);
pub const GENERATION_ACK: &str = "AI analysis complete";

// ── Recommendations ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationKind {
    CheckInCall,
    FeatureTutorial,
    AnnualDiscount,
}

impl RecommendationKind {
    /// Rules in priority order: high churn first, then low usage.
    pub fn for_user(user: &User) -> Self {
        if user.churn_probability > CHECK_IN_CHURN_THRESHOLD {
            Self::CheckInCall
        } else if user.feature_usage.feature1 < TUTORIAL_FEATURE_THRESHOLD {
            Self::FeatureTutorial
        } else {
            Self::AnnualDiscount
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::CheckInCall => "Schedule check-in call",
            Self::FeatureTutorial => "Send feature tutorial",
            Self::AnnualDiscount => "Offer discount on annual plan",
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::CheckInCall => 0.91,
            Self::FeatureTutorial => 0.72,
            Self::AnnualDiscount => 0.85,
        }
    }

    pub fn best_time(&self) -> &'static str {
        match self {
            Self::CheckInCall => "Thursday 3:00 PM",
            Self::FeatureTutorial => "Wednesday 10:00 AM",
            Self::AnnualDiscount => "Tuesday 2:00 PM",
        }
    }

    pub fn expected_impact(&self) -> &'static str {
        match self {
            Self::CheckInCall => "Reduce churn risk by 60%",
            Self::FeatureTutorial => "Increase engagement by 35%",
            Self::AnnualDiscount => "Reduce churn risk by 40%",
        }
    }

    fn message(&self, user: &User) -> String {
        let first = user.first_name();
        match self {
            Self::CheckInCall => format!(
                "Hi {first}, our success team would love to ensure you're getting maximum value from {}'s subscription.",
                user.company
            ),
            Self::FeatureTutorial => format!(
                "{first}, unlock the full potential of our analytics dashboard with this quick guide."
            ),
            Self::AnnualDiscount => format!(
                "Hi {first}, we'd love to help you save 25% with our annual plan upgrade!"
            ),
        }
    }
}

/// Next best action for one user. Pure: same user, same answer.
pub fn recommend_for(user: &User) -> AiRecommendation {
    let kind = RecommendationKind::for_user(user);
    AiRecommendation {
        action: kind.action().to_string(),
        message: kind.message(user),
        confidence: kind.confidence(),
        best_time: kind.best_time().to_string(),
        expected_impact: kind.expected_impact().to_string(),
    }
}

// ── Campaign messages ────────────────────────────────────────────────────────

/// Message template for every (segment, channel) cell.
pub fn compose_message(segment: SegmentKind, channel: Channel) -> &'static str {
    use Channel::*;
    use SegmentKind::*;
    match (segment, channel) {
        (HighRisk, Email) => "We miss you! Here's an exclusive offer to help you get back on track with a 30% discount on your next billing cycle.",
        (HighRisk, InApp) => "Welcome back! Discover what's new and claim your personalized recommendations.",
        (HighRisk, Push) => "Don't miss out on your success! New features are waiting for you.",
        (PowerUsers, Email) => "You're crushing it! Ready to unlock even more power with our advanced features? Upgrade now with 20% off.",
        (PowerUsers, InApp) => "You've mastered the basics! Time to explore our advanced features designed for power users like you.",
        (PowerUsers, Push) => "New advanced features available! Perfect for power users like you.",
        (NewUsers, Email) => "Welcome to the team! Here's your personalized onboarding guide to help you succeed.",
        (NewUsers, InApp) => "Great to have you aboard! Let's get you set up for success with these key features.",
        (NewUsers, Push) => "Ready to get started? Your personalized setup guide is here!",
        (Dormant, Email) => "We've missed you! Here's what's new and how it can help your business grow.",
        (Dormant, InApp) => "Welcome back! See what's improved since your last visit.",
        (Dormant, Push) => "Time to check in! New features are waiting for you.",
    }
}

/// Lookup by display labels ("High Risk", "In-app"). Any unknown key
/// yields `FALLBACK_MESSAGE`; this never fails.
pub fn compose_message_for(segment_name: &str, channel: &str) -> &'static str {
    match (segment_name.parse::<SegmentKind>(), channel.parse::<Channel>()) {
        (Ok(segment), Ok(channel)) => compose_message(segment, channel),
        (parsed_segment, parsed_channel) => {
            log::warn!(
                "selector: no template for segment={segment_name:?} channel={channel:?}, using fallback (segment_known={}, channel_known={})",
                parsed_segment.is_ok(),
                parsed_channel.is_ok()
            );
            FALLBACK_MESSAGE
        }
    }
}

// ── Generation stand-in ──────────────────────────────────────────────────────

/// Placeholder for a future backend generation call: resolves once with
/// `GENERATION_ACK` after exactly `GENERATION_DELAY`. Dropping the future
/// abandons it; there is no cancellation, retry or error path.
pub async fn simulate_generation() -> &'static str {
    tokio::time::sleep(GENERATION_DELAY).await;
    GENERATION_ACK
}
