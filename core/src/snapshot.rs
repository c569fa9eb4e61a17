//! The dashboard snapshot: the single immutable bundle every view reads.
//!
//! Built once at startup by `DashboardSnapshot::build` and passed down
//! explicitly. Nothing mutates it afterwards; re-aggregating the same
//! users against the same `generated_at` yields identical segments and
//! metrics.

use crate::{
    campaign::seed_campaigns,
    config::DashboardConfig,
    error::DashboardResult,
    metrics::compute_metrics,
    model::{Campaign, Metrics, Segment, SegmentKind, User},
    population::PopulationGenerator,
    query,
    rng::RngBank,
    segment::{compute_segments, find_segment},
    types::Timestamp,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    /// Reference "now" for every relative date and day count.
    pub generated_at: Timestamp,
    /// Master seed the population was drawn from.
    pub seed: u64,
    pub users: Vec<User>,
    pub segments: Vec<Segment>,
    pub metrics: Metrics,
    pub campaigns: Vec<Campaign>,
}

impl DashboardSnapshot {
    /// Generate a snapshot as of the current wall-clock time.
    pub fn build(config: &DashboardConfig) -> DashboardResult<Self> {
        Self::build_at(config, Utc::now())
    }

    /// Generate a snapshot against a fixed reference instant.
    /// Same seed and `as_of` always produce the same snapshot.
    pub fn build_at(config: &DashboardConfig, as_of: Timestamp) -> DashboardResult<Self> {
        config.validate()?;

        let rng_bank = match config.seed {
            Some(seed) => RngBank::new(seed),
            None => RngBank::from_entropy(),
        };

        let users = PopulationGenerator::new(&rng_bank, as_of).generate(config.population_size);
        let snapshot = Self::from_users(users, as_of, rng_bank.seed());

        log::info!(
            "snapshot: seed={} users={} segments=[{}] mrr={} active={}",
            snapshot.seed,
            snapshot.users.len(),
            snapshot
                .segments
                .iter()
                .map(|s| format!("{}:{}", s.id, s.user_count))
                .collect::<Vec<_>>()
                .join(", "),
            snapshot.metrics.mrr,
            snapshot.metrics.active_users,
        );
        Ok(snapshot)
    }

    /// Aggregate an existing population. Used by `build_at` and by tests
    /// that need hand-built users.
    pub fn from_users(users: Vec<User>, as_of: Timestamp, seed: u64) -> Self {
        let segments = compute_segments(&users, as_of);
        let metrics = compute_metrics(&users, as_of);
        Self {
            generated_at: as_of,
            seed,
            users,
            segments,
            metrics,
            campaigns: seed_campaigns(),
        }
    }

    /// Recompute segments over this snapshot's users without regenerating.
    pub fn recompute_segments(&self) -> Vec<Segment> {
        compute_segments(&self.users, self.generated_at)
    }

    /// Recompute metrics over this snapshot's users without regenerating.
    pub fn recompute_metrics(&self) -> Metrics {
        compute_metrics(&self.users, self.generated_at)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        query::find_user(&self.users, id)
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        find_segment(&self.segments, id)
    }

    pub fn segment_by_kind(&self, kind: SegmentKind) -> Option<&Segment> {
        self.segments.iter().find(|s| s.kind == kind)
    }

    /// Resolve a campaign's weak segment reference.
    pub fn segment_for(&self, campaign: &Campaign) -> Option<&Segment> {
        self.segment(&campaign.segment_id)
    }

    pub fn to_json(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> DashboardResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
