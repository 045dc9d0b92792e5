use serde::{Deserialize, Serialize};

/// Read projection of a catalog product, ready to be placed into a fragment.
///
/// `thumbnail_markup` and `price_markup` are already sanitized markup; the
/// remaining fields are plain text and get escaped when rendered.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProductSummary {
    pub permalink_url: String,
    pub thumbnail_markup: String,
    pub name: String,
    pub price_markup: String,
}
