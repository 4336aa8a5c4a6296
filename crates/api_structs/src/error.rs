use serde::{Deserialize, Serialize};

/// Body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    /// Text the parser could not turn into an event
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub remainder: Option<String>,
}
