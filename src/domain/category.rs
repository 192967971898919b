use serde::{Deserialize, Serialize};

/// A product category, referenced by catalog filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}
