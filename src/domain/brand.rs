use serde::{Deserialize, Serialize};

/// A phone manufacturer, referenced by catalog filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Brand {
    pub id: String,
    pub name: String,
}
