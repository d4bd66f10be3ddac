//! Classification and faceted-filtering engine for the creator-ops
//! dashboard.
//!
//! Three pure components behind one facade:
//! - ordered-threshold tier classification (GMV badges, compliance
//!   priorities, rating colors, status styles),
//! - faceted filtering of entity collections against an immutable
//!   `FilterSpec`,
//! - deadline bucketing with a grace window for overdue items.
//!
//! The presentation layer owns all state and I/O; it hands in validated
//! collections, the current `FilterSpec`, and the wall-clock date, and
//! renders what comes back. Everything here is synchronous, deterministic,
//! and side-effect free.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod classify;
pub mod config;
pub mod deadline;
pub mod errors;
pub mod facet;
pub mod model;

pub use classify::{
    StatusStyle, Threshold, ThresholdTable, compliance_priorities, gmv_tiers, rating_colors,
    status_style,
};
pub use config::{DeadlineConfig, EngineConfig, TierConfig};
pub use deadline::{DeadlineAssessment, DeadlineStatus, GraceWindow, classify_deadline};
pub use errors::{EngineError, ErrorCategory, Result};
pub use facet::{FilterCache, FilterSpec, MetricRange, filter_entities};
pub use model::{ContentSubmission, Creator, DataSet, Deliverable, Faceted};

use chrono::NaiveDate;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main entry point for dashboard classification and filtering.
///
/// Holds the validated threshold tables built from configuration; every
/// operation on it is a pure function of its arguments.
#[derive(Debug)]
pub struct DashboardEngine {
    cfg: EngineConfig,
    gmv: ThresholdTable,
    compliance: ThresholdTable,
    rating: ThresholdTable,
}

impl DashboardEngine {
    /// Create an engine, loading config from the default location.
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::load()?)
    }

    /// Create an engine with a specific config.
    ///
    /// # Errors
    ///
    /// Fails fast if the config's threshold tables violate their
    /// construction invariants.
    pub fn with_config(cfg: EngineConfig) -> Result<Self> {
        cfg.validate()?;
        let gmv = cfg.tiers.gmv_table()?;

        tracing::info!(
            version = VERSION,
            gmv_tiers = gmv.entries().len(),
            grace_days = cfg.deadline.grace_days,
            "dashboard engine initialized"
        );

        Ok(Self {
            cfg,
            gmv,
            compliance: compliance_priorities(),
            rating: rating_colors(),
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tier classification
    // ─────────────────────────────────────────────────────────────────────

    /// GMV badge for a creator's total GMV.
    pub fn gmv_tier(&self, total_gmv: f64) -> &str {
        self.gmv.classify(total_gmv)
    }

    /// Numeric GMV tier rank (0 = below every bound).
    pub fn gmv_tier_rank(&self, total_gmv: f64) -> usize {
        self.gmv.rank(total_gmv)
    }

    /// Priority label for a 0-100 compliance score.
    pub fn compliance_priority(&self, score: f64) -> &str {
        self.compliance.classify(score)
    }

    /// Color band for a 0-5 rating.
    pub fn rating_color(&self, rating: f64) -> &str {
        self.rating.classify(rating)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Faceted filtering
    // ─────────────────────────────────────────────────────────────────────

    /// Filter any faceted collection, preserving input order.
    pub fn filter<'a, E: Faceted>(&self, entities: &'a [E], spec: &FilterSpec) -> Vec<&'a E> {
        filter_entities(entities, spec)
    }

    /// Wrap creators with their derived GMV tier so the tier itself is
    /// filterable (the `gmvTier` facet).
    pub fn tiered_creators<'a>(&self, creators: &'a [Creator]) -> Vec<TieredCreator<'a>> {
        creators
            .iter()
            .map(|creator| TieredCreator {
                gmv_tier: self.gmv.classify(creator.total_gmv).to_string(),
                creator,
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Deadline assessment
    // ─────────────────────────────────────────────────────────────────────

    /// Assess one deliverable against an injected "now".
    pub fn assess(&self, now: NaiveDate, deliverable: &Deliverable) -> DeadlineAssessment {
        classify_deadline(
            now,
            deliverable.deadline,
            deliverable.completed,
            &self.cfg.deadline,
        )
    }

    /// Wrap deliverables with their assessment so the status bucket is
    /// filterable (the `deadlineStatus` facet).
    pub fn assessed_deliverables<'a>(
        &self,
        now: NaiveDate,
        deliverables: &'a [Deliverable],
    ) -> Vec<AssessedDeliverable<'a>> {
        deliverables
            .iter()
            .map(|deliverable| AssessedDeliverable {
                assessment: self.assess(now, deliverable),
                deliverable,
            })
            .collect()
    }
}

/// A creator plus its derived GMV tier.
///
/// Exposes everything the underlying creator does, plus the `gmvTier`
/// categorical facet.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredCreator<'a> {
    pub creator: &'a Creator,
    pub gmv_tier: String,
}

impl Faceted for TieredCreator<'_> {
    fn id(&self) -> &str {
        self.creator.id()
    }

    fn numeric(&self, field: &str) -> Option<f64> {
        self.creator.numeric(field)
    }

    fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            "gmvTier" => Some(&self.gmv_tier),
            _ => self.creator.categorical(field),
        }
    }

    fn multi_valued(&self, field: &str) -> Option<&[String]> {
        self.creator.multi_valued(field)
    }

    fn search_fields(&self) -> Vec<&str> {
        self.creator.search_fields()
    }
}

/// A deliverable plus its deadline assessment.
///
/// Exposes everything the underlying deliverable does, plus the
/// `deadlineStatus` categorical facet.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessedDeliverable<'a> {
    pub deliverable: &'a Deliverable,
    pub assessment: DeadlineAssessment,
}

impl Faceted for AssessedDeliverable<'_> {
    fn id(&self) -> &str {
        self.deliverable.id()
    }

    fn numeric(&self, field: &str) -> Option<f64> {
        self.deliverable.numeric(field)
    }

    fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            "deadlineStatus" => Some(self.assessment.status.as_str()),
            _ => self.deliverable.categorical(field),
        }
    }

    fn multi_valued(&self, field: &str) -> Option<&[String]> {
        self.deliverable.multi_valued(field)
    }

    fn search_fields(&self) -> Vec<&str> {
        self.deliverable.search_fields()
    }
}
