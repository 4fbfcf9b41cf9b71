use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InventoryRecord — the wire form, what clients see
// ---------------------------------------------------------------------------

/// A single inventory record.
///
/// All payload fields are optional: a field omitted at create or update time
/// is stored as absent and omitted from responses. There are no cross-field
/// constraints and no enforced ranges; `status` is a free-form short code
/// ("S", "T", "R" by convention, not enforced).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Store-assigned identifier, immutable once created.
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prodname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// StoredRecord — the persisted form
// ---------------------------------------------------------------------------

/// Persisted document: the record plus an internal version counter.
///
/// `__v` starts at 0 and is incremented on every update. It never appears in
/// API responses — the store layer strips it on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(flatten)]
    pub record: InventoryRecord,

    #[serde(rename = "__v", default)]
    pub version: u64,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /inventory`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub prodname: Option<String>,
    #[serde(default)]
    pub qty: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `PUT /inventory`.
///
/// The update is a wholesale overwrite: every payload field is written with
/// exactly the value given here, so an omitted field clobbers the prior one
/// to absent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub prodname: Option<String>,
    #[serde(default)]
    pub qty: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}
