//! Wire schema of the product browse endpoint.
//!
//! The same types are serialized by the server and deserialized by the
//! client controller, so both ends agree on one explicit contract.

use serde::{Deserialize, Serialize};

/// Path of the browse endpoint.
pub const BROWSE_ENDPOINT: &str = "/browse";
/// Fixed `action` value selecting the product loader.
pub const LOAD_PRODUCTS_ACTION: &str = "load_products";
/// Tab identifier meaning "every category".
pub const ALL_TAB_ID: &str = "all";

/// Request body sent by the client, form encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowseRequest {
    pub action: String,
    pub token: String,
    pub category: String,
    pub search: String,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

/// Echo of the resolved request, returned with every successful response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseDebug {
    pub category: String,
    pub search: String,
    pub page: u32,
    pub page_size: u32,
    pub total_count: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowsePayload {
    pub fragment: String,
    pub debug: BrowseDebug,
}

/// Failure class reported alongside the message.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    Unauthorized,
    QueryFailed,
    BadRequest,
    #[default]
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowseFailure {
    pub message: String,
    #[serde(default)]
    pub code: FailureCode,
}

/// Envelope of every browse response:
/// `{ "success": true, "payload": … }` or `{ "success": false, "error": … }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowseResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<BrowsePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<BrowseFailure>,
}

impl BrowseResponse {
    pub fn success(payload: BrowsePayload) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(code: FailureCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(BrowseFailure {
                message: message.into(),
                code,
            }),
        }
    }

    /// Splits the envelope; a success flag without a payload counts as an
    /// internal failure.
    pub fn into_result(self) -> Result<BrowsePayload, BrowseFailure> {
        match (self.success, self.payload, self.error) {
            (true, Some(payload), _) => Ok(payload),
            (_, _, Some(error)) => Err(error),
            _ => Err(BrowseFailure {
                message: "malformed response".to_string(),
                code: FailureCode::Internal,
            }),
        }
    }
}

/// One category tab offered by the initial render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTab {
    pub id: String,
    pub name: String,
}

/// Everything a client controller needs to start browsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseBootstrap {
    pub endpoint: String,
    pub action: String,
    pub token: String,
    pub page_size: u32,
    pub search_enabled: bool,
    /// Always starts with the `all` tab.
    pub tabs: Vec<CategoryTab>,
}
