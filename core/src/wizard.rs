//! Four-stage campaign builder: segment → channel → message → timing.
//!
//! The wizard owns only its own draft. Launching produces a summary and
//! a navigation target; the snapshot's campaign list is never touched.

use crate::{
    model::{Channel, Segment},
    navigation::View,
    selector::{compose_message, simulate_generation},
    snapshot::DashboardSnapshot,
    types::{SegmentId, Timestamp},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Segment = 1,
    Channel = 2,
    Message = 3,
    Timing = 4,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::Segment => Some(Self::Channel),
            Self::Channel => Some(Self::Message),
            Self::Message => Some(Self::Timing),
            Self::Timing => None,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Segment | Self::Channel => Self::Segment,
            Self::Message => Self::Channel,
            Self::Timing => Self::Message,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Timing {
    #[default]
    Immediate,
    Scheduled { at: Timestamp },
}

impl Timing {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::Scheduled { .. } => "Scheduled",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("select a target segment first")]
    SegmentRequired,

    #[error("select a campaign type first")]
    ChannelRequired,

    #[error("segment '{0}' is not in the snapshot")]
    UnknownSegment(String),

    #[error("already at the last step")]
    AtLastStep,

    #[error("campaign can only launch from the timing step (currently step {0})")]
    NotReadyToLaunch(u8),

    #[error("campaign message is empty")]
    EmptyMessage,
}

/// Result of a successful `next()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepChange {
    pub step: WizardStep,
    /// Entered the message step with no draft: caller should run
    /// `generate_message`.
    pub needs_generation: bool,
}

/// Step 4 summary card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignSummary {
    pub segment_name: String,
    pub channel: Channel,
    pub recipients: usize,
    pub timing: Timing,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchOutcome {
    pub summary: CampaignSummary,
    pub next_view: View,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignWizard {
    step: WizardStep,
    segment_id: Option<SegmentId>,
    channel: Option<Channel>,
    message: String,
    timing: Timing,
}

impl Default for CampaignWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Segment,
            segment_id: None,
            channel: None,
            message: String::new(),
            timing: Timing::Immediate,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn segment_id(&self) -> Option<&str> {
        self.segment_id.as_deref()
    }

    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn select_segment(
        &mut self,
        snapshot: &DashboardSnapshot,
        segment_id: &str,
    ) -> Result<(), WizardError> {
        if snapshot.segment(segment_id).is_none() {
            log::warn!("wizard: unknown segment {segment_id:?}");
            return Err(WizardError::UnknownSegment(segment_id.to_string()));
        }
        self.segment_id = Some(segment_id.to_string());
        Ok(())
    }

    pub fn select_channel(&mut self, channel: Channel) {
        self.channel = Some(channel);
    }

    /// Manual edit of the draft message.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    pub fn next(&mut self) -> Result<StepChange, WizardError> {
        match self.step {
            WizardStep::Segment if self.segment_id.is_none() => {
                return Err(WizardError::SegmentRequired)
            }
            WizardStep::Channel if self.channel.is_none() => {
                return Err(WizardError::ChannelRequired)
            }
            _ => {}
        }
        let step = self.step.next().ok_or(WizardError::AtLastStep)?;
        self.step = step;
        Ok(StepChange {
            step,
            needs_generation: step == WizardStep::Message && self.message.is_empty(),
        })
    }

    /// Step back; clamps at the first step.
    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    /// Wait on the generation stand-in, then fill the draft from the
    /// (segment, channel) template. Overwrites any manual edit.
    pub async fn generate_message(
        &mut self,
        snapshot: &DashboardSnapshot,
    ) -> Result<&str, WizardError> {
        let segment = self.selected_segment(snapshot)?;
        let kind = segment.kind;
        let channel = self.channel.ok_or(WizardError::ChannelRequired)?;

        let ack = simulate_generation().await;
        log::debug!("wizard: {ack} for {}/{}", kind.id(), channel.label());

        self.message = compose_message(kind, channel).to_string();
        Ok(&self.message)
    }

    pub fn summary(&self, snapshot: &DashboardSnapshot) -> Result<CampaignSummary, WizardError> {
        let segment = self.selected_segment(snapshot)?;
        let channel = self.channel.ok_or(WizardError::ChannelRequired)?;
        Ok(CampaignSummary {
            segment_name: segment.name.clone(),
            channel,
            recipients: segment.user_count,
            timing: self.timing,
            message: self.message.clone(),
        })
    }

    /// Launch from the timing step. Nothing is persisted; the caller
    /// should switch to `next_view`.
    pub fn launch(&self, snapshot: &DashboardSnapshot) -> Result<LaunchOutcome, WizardError> {
        if self.step != WizardStep::Timing {
            return Err(WizardError::NotReadyToLaunch(self.step.number()));
        }
        if self.message.trim().is_empty() {
            return Err(WizardError::EmptyMessage);
        }
        let summary = self.summary(snapshot)?;
        log::info!(
            "wizard: launched {} campaign to {} ({} recipients, {})",
            summary.channel,
            summary.segment_name,
            summary.recipients,
            summary.timing.label()
        );
        Ok(LaunchOutcome {
            summary,
            next_view: View::Performance,
        })
    }

    fn selected_segment<'a>(
        &self,
        snapshot: &'a DashboardSnapshot,
    ) -> Result<&'a Segment, WizardError> {
        let id = self.segment_id.as_deref().ok_or(WizardError::SegmentRequired)?;
        snapshot
            .segment(id)
            .ok_or_else(|| WizardError::UnknownSegment(id.to_string()))
    }
}
