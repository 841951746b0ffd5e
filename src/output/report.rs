use serde::{Deserialize, Serialize};

/// Summary returned to the caller after a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    /// Key the artifact was written under
    pub object_key: String,

    /// Bucket the artifact was written into
    pub bucket_name: String,

    /// Number of batches in the artifact
    pub batch_count: usize,
}

impl PipelineReport {
    /// Renders the report as pretty-printed JSON for the CLI
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
