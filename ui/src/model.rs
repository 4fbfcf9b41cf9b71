use serde::{Deserialize, Serialize};

/// One inventory record as the server sends it.
///
/// Fields other than `_id` may be absent — the server omits anything that
/// was never set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
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

/// Body of `POST /inventory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prodname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `PUT /inventory`. The `_id` selects the record; the rest
/// overwrite its fields wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePayload {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prodname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
