//! The fixed campaign catalog.
//!
//! Launching from the builder never appends here.

use crate::{
    model::{Campaign, CampaignStatus, Channel, SegmentKind},
    types::Timestamp,
};
use chrono::{TimeZone, Utc};

pub fn seed_campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            id: "campaign-1".into(),
            name: "High Risk Recovery".into(),
            channel: Channel::Email,
            segment_id: SegmentKind::HighRisk.id().into(),
            status: CampaignStatus::Completed,
            message: "We noticed you haven't been active lately. Here's a special offer to help you get more value...".into(),
            sent_to: 45,
            open_rate: 0.32,
            conversion_rate: 0.08,
            revenue_impact: 12_400,
            created_at: calendar_day(2024, 12, 15),
            scheduled_at: None,
        },
        Campaign {
            id: "campaign-2".into(),
            name: "Upgrade Opportunity".into(),
            channel: Channel::InApp,
            segment_id: SegmentKind::PowerUsers.id().into(),
            status: CampaignStatus::Active,
            message: "Ready to unlock advanced features? Upgrade to Pro and save 20%".into(),
            sent_to: 67,
            open_rate: 0.78,
            conversion_rate: 0.24,
            revenue_impact: 28_900,
            created_at: calendar_day(2024, 12, 18),
            scheduled_at: None,
        },
    ]
}

pub fn find_campaign<'a>(campaigns: &'a [Campaign], id: &str) -> Option<&'a Campaign> {
    campaigns.iter().find(|c| c.id == id)
}

/// Midnight UTC of a literal calendar date.
fn calendar_day(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("calendar literal is a valid UTC date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_two_campaigns_on_known_segments() {
        let campaigns = seed_campaigns();
        assert_eq!(campaigns.len(), 2);
        for c in &campaigns {
            assert!(SegmentKind::from_id(&c.segment_id).is_some());
            assert!((0.0..=1.0).contains(&c.open_rate));
            assert!((0.0..=1.0).contains(&c.conversion_rate));
        }
        assert!(find_campaign(&campaigns, "campaign-2").is_some());
        assert!(find_campaign(&campaigns, "campaign-3").is_none());
    }
}
