//! Performance screen data: trend series and campaign results.
//!
//! Trend series are fixed illustrative figures; the selected time range
//! only changes the label. Campaign rows come from the snapshot.

use crate::model::{Campaign, Channel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::Quarter => "Last 90 days",
            Self::Year => "Last year",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "7d" => Some(Self::Week),
            "30d" => Some(Self::Month),
            "90d" => Some(Self::Quarter),
            "1y" => Some(Self::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TrendPoint {
    pub month: &'static str,
    pub value: f64,
}

const RETENTION_RATE: [(&str, f64); 6] = [
    ("Jan", 85.0),
    ("Feb", 87.0),
    ("Mar", 89.0),
    ("Apr", 88.0),
    ("May", 91.0),
    ("Jun", 93.0),
];

const AVERAGE_CLV: [(&str, f64); 6] = [
    ("Jan", 6_800.0),
    ("Feb", 7_100.0),
    ("Mar", 7_400.0),
    ("Apr", 7_200.0),
    ("May", 7_600.0),
    ("Jun", 7_900.0),
];

/// Monthly retention rate in percent.
pub fn retention_trend() -> Vec<TrendPoint> {
    to_points(&RETENTION_RATE)
}

/// Monthly average CLV in dollars.
pub fn clv_trend() -> Vec<TrendPoint> {
    to_points(&AVERAGE_CLV)
}

fn to_points(series: &[(&'static str, f64)]) -> Vec<TrendPoint> {
    series
        .iter()
        .map(|&(month, value)| TrendPoint { month, value })
        .collect()
}

/// Largest value in a series, for scaling bar heights.
pub fn series_peak(points: &[TrendPoint]) -> Option<f64> {
    points.iter().map(|p| p.value).reduce(f64::max)
}

/// One row of the campaign results table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignRow {
    pub name: String,
    pub channel: Channel,
    pub sent_to: u32,
    pub open_rate_pct: u32,
    pub conversion_rate_pct: u32,
    pub revenue_impact: i64,
}

pub fn campaign_rows(campaigns: &[Campaign]) -> Vec<CampaignRow> {
    campaigns
        .iter()
        .map(|c| CampaignRow {
            name: c.name.clone(),
            channel: c.channel,
            sent_to: c.sent_to,
            open_rate_pct: (c.open_rate * 100.0).round() as u32,
            conversion_rate_pct: (c.conversion_rate * 100.0).round() as u32,
            revenue_impact: c.revenue_impact,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignTotals {
    pub campaigns: usize,
    pub sent_to: u64,
    pub revenue_impact: i64,
    /// Unweighted means; `None` without campaigns.
    pub mean_open_rate: Option<f64>,
    pub mean_conversion_rate: Option<f64>,
}

pub fn campaign_totals(campaigns: &[Campaign]) -> CampaignTotals {
    let n = campaigns.len();
    let mean = |f: fn(&Campaign) -> f64| {
        (n > 0).then(|| campaigns.iter().map(f).sum::<f64>() / n as f64)
    };
    CampaignTotals {
        campaigns: n,
        sent_to: campaigns.iter().map(|c| u64::from(c.sent_to)).sum(),
        revenue_impact: campaigns.iter().map(|c| c.revenue_impact).sum(),
        mean_open_rate: mean(|c| c.open_rate),
        mean_conversion_rate: mean(|c| c.conversion_rate),
    }
}
