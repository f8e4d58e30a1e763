//! Normalized contact records

use serde::{Deserialize, Serialize};

/// A contact row after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Title Case, never empty.
    pub first_name: String,
    /// Title Case, may be empty for single-token names.
    pub last_name: String,
    /// Digits only.
    pub phone: String,
    /// Deduplicated; always contains the default tag exactly once.
    pub tags: Vec<String>,
}
