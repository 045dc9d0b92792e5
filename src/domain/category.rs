use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategorySlug};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub slug: CategorySlug,
    pub name: String,
}
