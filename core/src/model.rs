//! Domain records shared by the generator, the selectors and every view.
//!
//! Everything here is built once per snapshot and read-only afterwards.

use crate::types::{days_between, CampaignId, SegmentId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Plans ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Plan {
    Starter,
    Pro,
    Enterprise,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Starter, Plan::Pro, Plan::Enterprise];

    /// Lifetime value a user on this plan is generated around.
    pub fn base_clv(&self) -> i64 {
        match self {
            Self::Starter => 2_400,
            Self::Pro => 7_200,
            Self::Enterprise => 18_000,
        }
    }

    /// Monthly recurring revenue of one seat: base CLV spread over a year.
    pub fn monthly_price(&self) -> i64 {
        self.base_clv() / 12
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Pro => "Pro",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureUsage {
    pub feature1: u8,
    pub feature2: u8,
    pub feature3: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub clv: i64,
    /// Always within [0.05, 0.95], two decimals.
    pub churn_probability: f64,
    pub last_login: Timestamp,
    pub days_active: u32,
    pub signup_date: Timestamp,
    pub plan: Plan,
    pub feature_usage: FeatureUsage,
    pub activities: Vec<Activity>,
}

impl User {
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or(&self.name)
    }

    /// Fractional days since signup, measured from `as_of`.
    pub fn days_since_signup(&self, as_of: Timestamp) -> f64 {
        days_between(self.signup_date, as_of)
    }

    /// Fractional days since last login, measured from `as_of`.
    pub fn days_since_login(&self, as_of: Timestamp) -> f64 {
        days_between(self.last_login, as_of)
    }

    /// Retention likelihood in whole percent: `round((1 - churn) * 100)`.
    pub fn health_score(&self) -> u32 {
        ((1.0 - self.churn_probability) * 100.0).round().clamp(0.0, 100.0) as u32
    }

    pub fn health_band(&self) -> HealthBand {
        HealthBand::for_score(self.health_score())
    }
}

/// Banding of the health score shown on the user detail card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Healthy,
    AtRisk,
    HighRisk,
}

impl HealthBand {
    /// Above 70 is healthy, above 40 at risk, anything else high risk.
    pub fn for_score(score: u32) -> Self {
        if score > 70 {
            Self::Healthy
        } else if score > 40 {
            Self::AtRisk
        } else {
            Self::HighRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::AtRisk => "At Risk",
            Self::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for HealthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Login,
    FeatureUse,
    CampaignOpened,
    CampaignClicked,
    SupportTicket,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Login,
        ActivityType::FeatureUse,
        ActivityType::CampaignOpened,
        ActivityType::CampaignClicked,
        ActivityType::SupportTicket,
    ];

    /// Wire name, as serialized.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::FeatureUse => "feature_use",
            Self::CampaignOpened => "campaign_opened",
            Self::CampaignClicked => "campaign_clicked",
            Self::SupportTicket => "support_ticket",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Login => "User logged into dashboard",
            Self::FeatureUse => "Used analytics feature",
            Self::CampaignOpened => "Opened retention email",
            Self::CampaignClicked => "Clicked campaign CTA",
            Self::SupportTicket => "Created support ticket",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Drawn independently of `kind`; the two need not agree.
    pub description: String,
    pub timestamp: Timestamp,
}

// ── Segments ─────────────────────────────────────────────────────────────────

/// The four fixed segments. Closed so message tables are total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    HighRisk,
    PowerUsers,
    NewUsers,
    Dormant,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 4] = [
        SegmentKind::HighRisk,
        SegmentKind::PowerUsers,
        SegmentKind::NewUsers,
        SegmentKind::Dormant,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::HighRisk => "high-risk",
            Self::PowerUsers => "power-users",
            Self::NewUsers => "new-users",
            Self::Dormant => "dormant",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk",
            Self::PowerUsers => "Power Users",
            Self::NewUsers => "New Users",
            Self::Dormant => "Dormant",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::HighRisk => "Users with churn probability > 70%",
            Self::PowerUsers => "High engagement, upgrade ready",
            Self::NewUsers => "Users signed up in last 30 days",
            Self::Dormant => "No activity in 14+ days",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SegmentKind {
    type Err = UnknownKey;

    /// Parses the display name ("High Risk"), not the id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

/// Inclusive min/max bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn min(min: f64) -> Self {
        Self { min: Some(min), max: None }
    }

    pub fn max(max: f64) -> Self {
        Self { min: None, max: Some(max) }
    }
}

/// Declarative description of a segment. Informational only: the
/// authoritative membership test is `segment::matches`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SegmentCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub churn_probability: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clv: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_active: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_since_signup: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Vec<Plan>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub kind: SegmentKind,
    pub name: String,
    pub description: String,
    pub user_count: usize,
    /// `None` when no user matches.
    pub avg_clv: Option<i64>,
    pub criteria: SegmentCriteria,
}

impl Segment {
    /// Average CLV as shown on a card: `$7,204` or `N/A`.
    pub fn avg_clv_display(&self) -> String {
        format_money(self.avg_clv)
    }
}

// ── Campaigns ────────────────────────────────────────────────────────────────

/// Delivery channel, shown as "campaign type" in the builder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Channel {
    Email,
    #[serde(rename = "In-app")]
    InApp,
    Push,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Email, Channel::InApp, Channel::Push];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::InApp => "In-app",
            Self::Push => "Push",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Channel {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CampaignStatus {
    Draft,
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    #[serde(rename = "type")]
    pub channel: Channel,
    /// Lookup only; the segment may not exist.
    pub segment_id: SegmentId,
    pub status: CampaignStatus,
    pub message: String,
    pub sent_to: u32,
    pub open_rate: f64,
    pub conversion_rate: f64,
    pub revenue_impact: i64,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<Timestamp>,
}

// ── Aggregates ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    pub mrr: i64,
    pub active_users: usize,
    /// `None` for an empty population.
    pub avg_clv: Option<i64>,
    pub churn_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiRecommendation {
    pub action: String,
    pub message: String,
    pub confidence: f64,
    pub best_time: String,
    pub expected_impact: String,
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A segment name or channel label that is not in the closed tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key '{0}'")]
pub struct UnknownKey(pub String);

/// `$12,400` style rendering; `None` renders as `N/A`.
pub fn format_money(amount: Option<i64>) -> String {
    let Some(amount) = amount else {
        return "N/A".to_string();
    };
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_grouped_by_thousands() {
        assert_eq!(format_money(Some(0)), "$0");
        assert_eq!(format_money(Some(999)), "$999");
        assert_eq!(format_money(Some(7_200)), "$7,200");
        assert_eq!(format_money(Some(1_234_567)), "$1,234,567");
        assert_eq!(format_money(Some(-2_400)), "-$2,400");
        assert_eq!(format_money(None), "N/A");
    }

    #[test]
    fn labels_parse_back() {
        for channel in Channel::ALL {
            assert_eq!(channel.label().parse::<Channel>(), Ok(channel));
        }
        for kind in SegmentKind::ALL {
            assert_eq!(kind.name().parse::<SegmentKind>(), Ok(kind));
            assert_eq!(SegmentKind::from_id(kind.id()), Some(kind));
        }
        assert!("in-app".parse::<Channel>().is_err());
        assert!("high-risk".parse::<SegmentKind>().is_err());
    }

    fn user_with_churn(churn_probability: f64) -> User {
        let as_of = chrono::Utc::now();
        User {
            id: "user-0".into(),
            name: "Quinn Harris".into(),
            email: "quinn.harris@devstorm.com".into(),
            company: "DevStorm".into(),
            clv: 2_400,
            churn_probability,
            last_login: as_of,
            days_active: 3,
            signup_date: as_of,
            plan: Plan::Starter,
            feature_usage: FeatureUsage { feature1: 10, feature2: 20, feature3: 30 },
            activities: Vec::new(),
        }
    }

    #[test]
    fn health_bands_split_above_70_and_40() {
        assert_eq!(HealthBand::for_score(71), HealthBand::Healthy);
        assert_eq!(HealthBand::for_score(70), HealthBand::AtRisk);
        assert_eq!(HealthBand::for_score(41), HealthBand::AtRisk);
        assert_eq!(HealthBand::for_score(40), HealthBand::HighRisk);
        assert_eq!(HealthBand::for_score(0), HealthBand::HighRisk);
    }

    #[test]
    fn health_score_inverts_churn() {
        let cases = [
            (0.05, 95, HealthBand::Healthy),
            (0.29, 71, HealthBand::Healthy),
            (0.3, 70, HealthBand::AtRisk),
            (0.59, 41, HealthBand::AtRisk),
            (0.6, 40, HealthBand::HighRisk),
            (0.95, 5, HealthBand::HighRisk),
        ];
        for (churn, score, band) in cases {
            let user = user_with_churn(churn);
            assert_eq!(user.health_score(), score, "churn {churn}");
            assert_eq!(user.health_band(), band, "churn {churn}");
        }
        assert_eq!(HealthBand::AtRisk.to_string(), "At Risk");
    }

    #[test]
    fn activity_labels_match_wire_names() {
        for kind in ActivityType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
        assert_eq!(ActivityType::FeatureUse.label(), "feature_use");
    }

    #[test]
    fn channel_serializes_with_display_label() {
        let json = serde_json::to_string(&Channel::InApp).unwrap();
        assert_eq!(json, "\"In-app\"");
    }
}
