//! Core of the customer-retention dashboard.
//!
//! A synthetic user population is generated once into an immutable
//! [`snapshot::DashboardSnapshot`], together with the segment and metric
//! aggregates derived from it and the fixed campaign catalog. Views read
//! from the snapshot through [`query`], drive the campaign builder in
//! [`wizard`], and ask [`selector`] for canned recommendations and
//! messages.

pub mod campaign;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod name_generator;
pub mod navigation;
pub mod performance;
pub mod population;
pub mod query;
pub mod rng;
pub mod segment;
pub mod selector;
pub mod snapshot;
pub mod types;
pub mod wizard;
