//! Faceted filtering.
//!
//! A `FilterSpec` is an immutable snapshot of every facet's user-selected
//! constraint: a numeric range per metric, an accepted-value set per
//! categorical attribute, and an optional free-text query. Evaluation is
//! the logical AND of all active facets; an inactive facet is trivially
//! true, so the default spec is the identity and matches everything.
//!
//! Membership semantics differ by attribute shape and the asymmetry is
//! deliberate: a single-valued attribute must be a member of the accepted
//! set ("creator has status X"), a multi-valued attribute needs a
//! non-empty intersection ("creator has earned at least one of these
//! badges").

use crate::model::Faceted;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

/// Inclusive numeric range constraint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` falls inside the range, inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Intersection of two ranges. May be empty (min above max), in which
    /// case it matches nothing.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

/// Snapshot of the active facet selections.
///
/// Backed by `BTreeMap`/`BTreeSet` so iteration order, and therefore the
/// cache fingerprint, is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Numeric range per metric field.
    #[serde(default)]
    pub ranges: BTreeMap<String, MetricRange>,
    /// Accepted values per categorical or multi-valued field. An absent
    /// entry is "no constraint"; builders never store an empty set, but a
    /// conjunction of disjoint sets produces one, and it matches nothing.
    #[serde(default)]
    pub accepted: BTreeMap<String, BTreeSet<String>>,
    /// Case-insensitive free-text query over the entity's search fields.
    #[serde(default)]
    pub query: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inclusive numeric range facet.
    pub fn with_range(mut self, field: impl Into<String>, min: f64, max: f64) -> Self {
        self.ranges.insert(field.into(), MetricRange::new(min, max));
        self
    }

    /// Add a set-membership facet. An empty iterator leaves the facet
    /// unconstrained.
    pub fn with_accepted<I, S>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if !set.is_empty() {
            self.accepted.insert(field.into(), set);
        }
        self
    }

    /// Set the free-text query facet. Blank queries are treated as absent.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        if query.trim().is_empty() {
            self.query = None;
        } else {
            self.query = Some(query);
        }
        self
    }

    /// Whether this spec is the identity (matches every entity).
    pub fn is_identity(&self) -> bool {
        self.ranges.is_empty() && self.accepted.is_empty() && self.query.is_none()
    }

    /// Facet-wise conjunction of two specs.
    ///
    /// Ranges present on both sides intersect; accepted sets present on
    /// both sides intersect (an absent set is "accept all", so the
    /// constrained side wins). Disjoint sets intersect to the empty set,
    /// which matches nothing. Two distinct free-text queries are not
    /// expressible as one substring; the left query is kept and the
    /// conflict logged.
    pub fn and(mut self, other: FilterSpec) -> FilterSpec {
        for (field, range) in other.ranges {
            self.ranges
                .entry(field)
                .and_modify(|existing| *existing = existing.intersect(&range))
                .or_insert(range);
        }
        for (field, set) in other.accepted {
            self.accepted
                .entry(field)
                .and_modify(|existing| {
                    *existing = existing.intersection(&set).cloned().collect();
                })
                .or_insert(set);
        }
        match (&self.query, other.query) {
            (None, rhs) => self.query = rhs,
            (Some(lhs), Some(rhs)) if *lhs != rhs => {
                tracing::warn!(
                    kept = %lhs,
                    dropped = %rhs,
                    "conjunction of two text queries; keeping the left one"
                );
            }
            _ => {}
        }
        self
    }

    /// Evaluate every facet against one entity.
    pub fn matches<E: Faceted>(&self, entity: &E) -> bool {
        for (field, range) in &self.ranges {
            match entity.numeric(field) {
                Some(value) if range.contains(value) => {}
                _ => return false,
            }
        }

        for (field, set) in &self.accepted {
            let passes = if let Some(value) = entity.categorical(field) {
                set.contains(value)
            } else if let Some(values) = entity.multi_valued(field) {
                values.iter().any(|v| set.contains(v))
            } else {
                false
            };
            if !passes {
                return false;
            }
        }

        if let Some(query) = &self.query {
            let needle = query.trim().to_lowercase();
            if !needle.is_empty()
                && !entity
                    .search_fields()
                    .iter()
                    .any(|hay| hay.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        true
    }

    /// Stable fingerprint of this spec for memoization keys.
    fn digest_into(&self, hasher: &mut Sha256) {
        for (field, range) in &self.ranges {
            hasher.update(b"r");
            hasher.update(field.as_bytes());
            hasher.update(range.min.to_bits().to_le_bytes());
            hasher.update(range.max.to_bits().to_le_bytes());
        }
        for (field, set) in &self.accepted {
            hasher.update(b"a");
            hasher.update(field.as_bytes());
            for value in set {
                hasher.update([0u8]);
                hasher.update(value.as_bytes());
            }
        }
        if let Some(query) = &self.query {
            hasher.update(b"q");
            hasher.update(query.as_bytes());
        }
    }
}

/// Filter a collection, preserving input order.
///
/// Deterministic: for fixed `entities` and `spec` the output is exactly
/// reproducible. O(n · f) in entity count and active facets.
pub fn filter_entities<'a, E: Faceted>(entities: &'a [E], spec: &FilterSpec) -> Vec<&'a E> {
    let matched: Vec<&E> = entities.iter().filter(|e| spec.matches(*e)).collect();
    tracing::debug!(total = entities.len(), matched = matched.len(), "facet scan");
    matched
}

/// Single-slot memo for the filter scan.
///
/// Keyed on a SHA-256 fingerprint of (spec, entity content), so the
/// O(n · f) scan reruns only when either input actually changes —
/// reorderings, additions, removals, and edited attribute values under a
/// stable id all miss. Stores matching indices rather than references to
/// keep the cache independent of the collection's lifetime.
#[derive(Debug, Default)]
pub struct FilterCache {
    last: Option<(String, Vec<usize>)>,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of the entities matching `spec`, in input order. Reuses the
    /// previous result when neither the spec nor the collection changed.
    pub fn filter_indices<E>(&mut self, entities: &[E], spec: &FilterSpec) -> &[usize]
    where
        E: Faceted + Serialize,
    {
        let key = cache_key(entities, spec);
        let hit = self.last.as_ref().is_some_and(|(k, _)| *k == key);
        if !hit {
            let indices: Vec<usize> = entities
                .iter()
                .enumerate()
                .filter(|(_, e)| spec.matches(*e))
                .map(|(i, _)| i)
                .collect();
            self.last = Some((key, indices));
        }
        match &self.last {
            Some((_, indices)) => indices,
            None => &[],
        }
    }

    /// Whether the cache currently holds a result for (entities, spec).
    pub fn is_fresh<E>(&self, entities: &[E], spec: &FilterSpec) -> bool
    where
        E: Faceted + Serialize,
    {
        let key = cache_key(entities, spec);
        self.last.as_ref().is_some_and(|(k, _)| *k == key)
    }
}

fn cache_key<E: Faceted + Serialize>(entities: &[E], spec: &FilterSpec) -> String {
    let mut hasher = Sha256::new();
    spec.digest_into(&mut hasher);
    for entity in entities {
        hasher.update([0u8]);
        // Hash the full serialized record: a value edit under a stable id
        // must invalidate. Serialization of these plain records cannot
        // fail; if it ever does, degrade to the id alone.
        match serde_json::to_vec(entity) {
            Ok(bytes) => hasher.update(&bytes),
            Err(_) => hasher.update(entity.id().as_bytes()),
        }
    }
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
