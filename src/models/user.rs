use serde::{Deserialize, Serialize};

/// The authenticated account as returned by `GET /user`.
///
/// The backend sends more fields than the client strictly needs (timestamps,
/// preferences, verification flags); anything unrecognized lands in `extra`
/// so shells can reach it without this crate chasing every backend change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            extra: serde_json::Map::new(),
        }
    }
}
