//! The synthetic material record.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One generated material document.
///
/// Serializes to the document shape of the materials collection:
///
/// ```json
/// {
///   "_id": "3b241101-e2bb-4255-8caf-4136c566a962",
///   "material_type": { "_id": "cb491d0c-97e9-4d88-a68e-61896e064278" },
///   "supplier_name": "Supplier Name 0",
///   "donor_id": "Donor ID 0",
///   "gender": "female",
///   "common_name": "Common Name 0",
///   "phenotype": "Phenotype 0",
///   "date_of_receipt": "2013-04-17T08:21:05.330Z",
///   "meta": { "anything": "i like 0" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticRecord {
    /// Zero-based generation order. Not part of the document.
    #[serde(skip)]
    pub index: u64,

    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(rename = "material_type", serialize_with = "serialize_category_ref")]
    pub category_ref: String,

    pub supplier_name: String,
    pub donor_id: String,
    pub gender: String,
    pub common_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    pub phenotype: String,

    #[serde(serialize_with = "serialize_millis")]
    pub date_of_receipt: DateTime<Utc>,

    pub meta: BTreeMap<String, String>,
}

fn serialize_category_ref<S: Serializer>(category: &str, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("_id", category)?;
    map.end()
}

fn serialize_millis<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}
