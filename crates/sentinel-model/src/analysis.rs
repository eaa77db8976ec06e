use serde::{Deserialize, Serialize};

/// Dataset description returned by the schema analysis operation.
///
/// All four fields are required on the wire; a response missing any of them
/// is rejected before it reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAnalysis {
    pub features: Vec<String>,
    pub target_variable: String,
    pub data_issues: Vec<String>,
    pub summary: String,
}
