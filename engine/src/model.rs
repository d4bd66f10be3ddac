//! Entity records and the `Faceted` seam.
//!
//! The presentation layer hands in already-validated, fully-populated
//! records; the engine never sees a missing required field. Wire names are
//! camelCase to match the upstream mock datasets (`totalGMV`,
//! `submittedDate`, ...). Dates carry day granularity only, so they are
//! `NaiveDate` throughout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Access seam between entity records and the filter engine.
///
/// Facet fields are addressed by their wire name. A field the record does
/// not carry returns `None`; the filter engine treats a facet on a missing
/// field as a non-match, so a typo in a facet name surfaces as an empty
/// result rather than an unfiltered one.
pub trait Faceted {
    /// Identifier, unique within the entity's collection.
    fn id(&self) -> &str;

    /// Numeric metric by field name.
    fn numeric(&self, field: &str) -> Option<f64>;

    /// Single-valued categorical attribute by field name.
    fn categorical(&self, field: &str) -> Option<&str>;

    /// Multi-valued categorical attribute by field name.
    fn multi_valued(&self, field: &str) -> Option<&[String]>;

    /// Fields the free-text search facet scans.
    fn search_fields(&self) -> Vec<&str>;
}

/// A creator in the agency database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub email: String,
    pub status: String,
    pub niche: String,
    pub platform: String,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(rename = "totalGMV")]
    pub total_gmv: f64,
    pub consistency: f64,
    pub rating: f64,
    pub engagement_rate: f64,
}

impl Faceted for Creator {
    fn id(&self) -> &str {
        &self.id
    }

    fn numeric(&self, field: &str) -> Option<f64> {
        match field {
            "totalGMV" => Some(self.total_gmv),
            "consistency" => Some(self.consistency),
            "rating" => Some(self.rating),
            "engagementRate" => Some(self.engagement_rate),
            _ => None,
        }
    }

    fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(&self.status),
            "niche" => Some(&self.niche),
            "platform" => Some(&self.platform),
            _ => None,
        }
    }

    fn multi_valued(&self, field: &str) -> Option<&[String]> {
        match field {
            "badges" => Some(&self.badges),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.handle, &self.email]
    }
}

/// A piece of submitted content awaiting review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSubmission {
    pub id: String,
    pub creator_name: String,
    pub handle: String,
    pub title: String,
    pub status: String,
    pub platform: String,
    #[serde(default)]
    pub compliance_flags: Vec<String>,
    pub compliance_score: f64,
    pub engagement_rate: f64,
    pub submitted_date: NaiveDate,
}

impl Faceted for ContentSubmission {
    fn id(&self) -> &str {
        &self.id
    }

    fn numeric(&self, field: &str) -> Option<f64> {
        match field {
            "complianceScore" => Some(self.compliance_score),
            "engagementRate" => Some(self.engagement_rate),
            _ => None,
        }
    }

    fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(&self.status),
            "platform" => Some(&self.platform),
            _ => None,
        }
    }

    fn multi_valued(&self, field: &str) -> Option<&[String]> {
        match field {
            "complianceFlags" => Some(&self.compliance_flags),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.creator_name, &self.handle, &self.title]
    }
}

/// A campaign deliverable with a deadline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    pub id: String,
    pub campaign: String,
    pub creator_name: String,
    pub title: String,
    pub status: String,
    pub platform: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl Faceted for Deliverable {
    fn id(&self) -> &str {
        &self.id
    }

    fn numeric(&self, _field: &str) -> Option<f64> {
        None
    }

    fn categorical(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(&self.status),
            "campaign" => Some(&self.campaign),
            "platform" => Some(&self.platform),
            _ => None,
        }
    }

    fn multi_valued(&self, _field: &str) -> Option<&[String]> {
        None
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.creator_name, &self.title, &self.campaign]
    }
}

/// The JSON envelope the presentation layer loads its collections from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSet {
    #[serde(default)]
    pub creators: Vec<Creator>,
    #[serde(default)]
    pub submissions: Vec<ContentSubmission>,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn creator_round_trips_camel_case_wire_names() {
        let json = r#"{
            "id": "c-1",
            "name": "Ava Chen",
            "handle": "@avachen",
            "email": "ava@example.com",
            "status": "active",
            "niche": "Beauty",
            "platform": "tiktok",
            "badges": ["Top Seller"],
            "totalGMV": 125000.0,
            "consistency": 92.0,
            "rating": 4.8,
            "engagementRate": 6.1
        }"#;
        let creator: Creator = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(creator.total_gmv, 125_000.0);
        assert_eq!(creator.engagement_rate, 6.1);

        let back = serde_json::to_value(&creator).expect("should serialize");
        assert!(back.get("totalGMV").is_some());
        assert!(back.get("engagementRate").is_some());
    }

    #[test]
    fn deliverable_parses_day_granular_deadline() {
        let json = r#"{
            "id": "d-1",
            "campaign": "Summer Launch",
            "creatorName": "Ava Chen",
            "title": "Unboxing video",
            "status": "pending",
            "platform": "tiktok",
            "deadline": "2026-06-21"
        }"#;
        let deliverable: Deliverable = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(
            deliverable.deadline,
            NaiveDate::from_ymd_opt(2026, 6, 21).expect("valid date")
        );
        assert!(!deliverable.completed);
    }

    #[test]
    fn unknown_facet_field_is_none() {
        let creator = fixtures::creator("c-1", "Ava Chen", "Beauty", 1000.0);
        assert_eq!(creator.numeric("followers"), None);
        assert_eq!(creator.categorical("timezone"), None);
        assert_eq!(creator.multi_valued("labels"), None);
    }

    #[test]
    fn dataset_defaults_to_empty_collections() {
        let ds: DataSet = serde_json::from_str("{}").expect("should deserialize");
        assert!(ds.creators.is_empty());
        assert!(ds.deliverables.is_empty());
    }
}
