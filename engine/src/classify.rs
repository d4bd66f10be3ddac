//! Ordered-threshold tier classification.
//!
//! One shared mechanism backs every derived tier on the dashboard: a table
//! of (minimum-inclusive-bound, label) pairs evaluated highest-bound-first.
//! The GMV badge, the compliance priority label, and the rating color band
//! are all instances of the same table; the presentation layer looks up a
//! style per label instead of re-deriving the label itself.
//!
//! A second, categorical instance maps status strings to fixed style
//! tokens. Upstream data may introduce status strings we have never seen,
//! so unknown values resolve to a neutral default token instead of erroring.

use crate::errors::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// One tier entry: every value at or above `bound` (and below the next
/// entry's bound) carries `label`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Minimum-inclusive bound for this tier.
    pub bound: f64,
    /// Display label for this tier.
    pub label: String,
}

impl Threshold {
    pub fn new(bound: f64, label: impl Into<String>) -> Self {
        Self {
            bound,
            label: label.into(),
        }
    }
}

/// An ordered threshold table plus a fallback label for values below every
/// bound.
///
/// Construction validates the table invariants once so `classify` can be
/// total at call time: a non-empty table, finite bounds, strictly
/// increasing order.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTable {
    /// Entries in strictly increasing bound order.
    entries: Vec<Threshold>,
    /// Label returned when `value` is below the lowest bound.
    fallback: String,
}

impl ThresholdTable {
    /// Build a table, failing fast on invariant violations.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidThresholds` if `entries` is empty,
    /// contains a non-finite bound, or is not strictly increasing by bound.
    pub fn new(entries: Vec<Threshold>, fallback: impl Into<String>) -> Result<Self> {
        if entries.is_empty() {
            return Err(EngineError::thresholds("table must not be empty"));
        }
        for entry in &entries {
            if !entry.bound.is_finite() {
                return Err(EngineError::thresholds(format!(
                    "bound for {:?} is not finite",
                    entry.label
                )));
            }
        }
        for pair in entries.windows(2) {
            if pair[1].bound <= pair[0].bound {
                return Err(EngineError::thresholds(format!(
                    "bounds must be strictly increasing: {} (for {:?}) is not above {} (for {:?})",
                    pair[1].bound, pair[1].label, pair[0].bound, pair[0].label
                )));
            }
        }
        Ok(Self {
            entries,
            fallback: fallback.into(),
        })
    }

    /// Classify a value into a tier label.
    ///
    /// Scans from the highest bound downward and returns the label of the
    /// first entry whose bound is ≤ `value`. Bounds are inclusive on the
    /// lower side. Values below every bound (including NaN, which compares
    /// false against everything) resolve to the fallback label, so this is
    /// total over all of `f64`.
    pub fn classify(&self, value: f64) -> &str {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.bound <= value)
            .map_or(&self.fallback, |entry| entry.label.as_str())
    }

    /// Numeric tier rank: 0 for the fallback, 1-based entry index
    /// otherwise. Monotone in `value` for a fixed table.
    pub fn rank(&self, value: f64) -> usize {
        self.entries
            .iter()
            .rposition(|entry| entry.bound <= value)
            .map_or(0, |i| i + 1)
    }

    /// Label for values below every bound.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Entries in increasing bound order.
    pub fn entries(&self) -> &[Threshold] {
        &self.entries
    }

    // Internal constructor for the built-in tables below, which are known
    // valid by inspection.
    fn from_static(pairs: &[(f64, &str)], fallback: &str) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(bound, label)| Threshold::new(*bound, *label))
                .collect(),
            fallback: fallback.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

/// GMV badge tiers used on creator cards.
pub fn gmv_tiers() -> ThresholdTable {
    ThresholdTable::from_static(
        &[
            (1_000.0, "$1K+ GMV"),
            (5_000.0, "$5K+ GMV"),
            (10_000.0, "$10K+ GMV"),
            (50_000.0, "$50K+ GMV"),
            (100_000.0, "$100K+ GMV"),
            (500_000.0, "$500K+ GMV"),
            (1_000_000.0, "$1M+ GMV"),
        ],
        "New Creator",
    )
}

/// Priority labels derived from a 0-100 compliance score. Lower scores are
/// more urgent for the review queue, so the fallback is the hottest label.
pub fn compliance_priorities() -> ThresholdTable {
    ThresholdTable::from_static(
        &[(50.0, "High"), (75.0, "Medium"), (90.0, "Low")],
        "Critical",
    )
}

/// Color band for a 0-5 star rating (also used for the 0-100 consistency
/// metric after dividing by 20).
pub fn rating_colors() -> ThresholdTable {
    ThresholdTable::from_static(
        &[(3.0, "yellow"), (4.0, "teal"), (4.5, "green")],
        "red",
    )
}

// ---------------------------------------------------------------------------
// Status style lookup
// ---------------------------------------------------------------------------

/// Fixed display tokens for a status value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusStyle {
    /// Color token the presentation layer maps to its palette.
    pub color: &'static str,
    /// Icon token.
    pub icon: &'static str,
    /// Badge text.
    pub badge: &'static str,
}

const STATUS_STYLES: &[(&str, StatusStyle)] = &[
    (
        "active",
        StatusStyle {
            color: "green",
            icon: "check-circle",
            badge: "Active",
        },
    ),
    (
        "approved",
        StatusStyle {
            color: "green",
            icon: "check-circle",
            badge: "Approved",
        },
    ),
    (
        "pending",
        StatusStyle {
            color: "yellow",
            icon: "clock",
            badge: "Pending Review",
        },
    ),
    (
        "flagged",
        StatusStyle {
            color: "orange",
            icon: "alert-triangle",
            badge: "Flagged",
        },
    ),
    (
        "rejected",
        StatusStyle {
            color: "red",
            icon: "x-circle",
            badge: "Rejected",
        },
    ),
    (
        "paused",
        StatusStyle {
            color: "gray",
            icon: "pause-circle",
            badge: "Paused",
        },
    ),
    (
        "completed",
        StatusStyle {
            color: "blue",
            icon: "check-circle",
            badge: "Completed",
        },
    ),
];

const DEFAULT_STATUS_STYLE: StatusStyle = StatusStyle {
    color: "gray",
    icon: "help-circle",
    badge: "Unknown",
};

/// Look up the display tokens for a status string, case-insensitively.
///
/// Unmatched statuses resolve to a neutral default token; the display layer
/// must always have something renderable.
pub fn status_style(status: &str) -> &'static StatusStyle {
    STATUS_STYLES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(status))
        .map_or(&DEFAULT_STATUS_STYLE, |(_, style)| style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gmv_worked_instance() {
        let table = gmv_tiers();
        assert_eq!(table.classify(125_000.0), "$100K+ GMV");
        assert_eq!(table.classify(750.0), "New Creator");
        assert_eq!(table.classify(2_400_000.0), "$1M+ GMV");
    }

    #[test]
    fn bound_is_inclusive_on_the_lower_side() {
        let table = gmv_tiers();
        assert_eq!(table.classify(1_000_000.0), "$1M+ GMV");
        assert_eq!(table.classify(999_999.99), "$500K+ GMV");
        assert_eq!(table.classify(1_000.0), "$1K+ GMV");
    }

    #[test]
    fn classification_is_total() {
        let table = gmv_tiers();
        for value in [
            f64::MIN,
            -1.0,
            0.0,
            f64::MAX,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
        ] {
            // Never panics, always produces a label.
            assert!(!table.classify(value).is_empty());
        }
        assert_eq!(table.classify(f64::NAN), "New Creator");
        assert_eq!(table.classify(f64::NEG_INFINITY), "New Creator");
        assert_eq!(table.classify(f64::INFINITY), "$1M+ GMV");
    }

    #[test]
    fn rank_is_monotone() {
        let table = gmv_tiers();
        let samples = [
            -10.0, 0.0, 750.0, 1_000.0, 4_999.0, 5_000.0, 80_000.0, 100_000.0, 2_000_000.0,
        ];
        for pair in samples.windows(2) {
            assert!(
                table.rank(pair[0]) <= table.rank(pair[1]),
                "rank({}) > rank({})",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(table.rank(-10.0), 0);
        assert_eq!(table.rank(2_000_000.0), 7);
    }

    #[test]
    fn empty_table_rejected() {
        let err = ThresholdTable::new(vec![], "n/a").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn non_increasing_bounds_rejected() {
        let entries = vec![
            Threshold::new(0.0, "low"),
            Threshold::new(10.0, "mid"),
            Threshold::new(10.0, "high"),
        ];
        let err = ThresholdTable::new(entries, "n/a").unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn non_finite_bound_rejected() {
        let entries = vec![Threshold::new(f64::NAN, "odd")];
        let err = ThresholdTable::new(entries, "n/a").unwrap_err();
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn compliance_priority_labels() {
        let table = compliance_priorities();
        assert_eq!(table.classify(95.0), "Low");
        assert_eq!(table.classify(90.0), "Low");
        assert_eq!(table.classify(80.0), "Medium");
        assert_eq!(table.classify(60.0), "High");
        assert_eq!(table.classify(30.0), "Critical");
    }

    #[test]
    fn rating_color_bands() {
        let table = rating_colors();
        assert_eq!(table.classify(4.9), "green");
        assert_eq!(table.classify(4.2), "teal");
        assert_eq!(table.classify(3.5), "yellow");
        assert_eq!(table.classify(2.1), "red");
    }

    #[test]
    fn status_lookup_is_case_insensitive() {
        assert_eq!(status_style("Approved").badge, "Approved");
        assert_eq!(status_style("PENDING").color, "yellow");
    }

    #[test]
    fn unknown_status_degrades_to_default() {
        let style = status_style("shadow-banned");
        assert_eq!(style.badge, "Unknown");
        assert_eq!(style.color, "gray");
    }
}
