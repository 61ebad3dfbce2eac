use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One comment record as stored on disk. `id` and `timestamp` are set
/// once at creation and never change; `lastEditTime` only appears after
/// the first successful edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub edited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edit_time: Option<i64>,
    pub user_name: String,
    pub content: String,
    /// Optional rating, stored exactly as the client sent it.
    #[serde(rename = "RatingVal", skip_serializing_if = "Option::is_none")]
    pub rating_val: Option<Value>,
}

/// A comment annotated with the product it belongs to. `productId` is
/// not persisted on the record; it is stamped on in the aggregate
/// "all comments" view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductComment {
    #[serde(flatten)]
    pub comment: Comment,
    #[serde(rename = "productId")]
    pub product_id: String,
}

/// The entire persisted state: product id -> ordered comment sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsDocument {
    pub product_comments: BTreeMap<String, Vec<Comment>>,
}
