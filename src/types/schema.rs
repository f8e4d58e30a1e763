//! Column layout patterns for uploaded contact sheets

use serde::{Deserialize, Serialize};

/// The fixed column layout a job's rows follow.
///
/// Chosen once per job from the declared column width, before any row is
/// processed, and never re-inferred per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaPattern {
    /// phone, full name, tags
    ThreeColumn,
    /// first name, last name, phone, tags
    FourColumn,
}

impl SchemaPattern {
    pub fn column_count(&self) -> usize {
        match self {
            SchemaPattern::ThreeColumn => 3,
            SchemaPattern::FourColumn => 4,
        }
    }

    /// Layout name for logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaPattern::ThreeColumn => "three_column",
            SchemaPattern::FourColumn => "four_column",
        }
    }
}
