//! Response models
//!
//! Only the fields the SDK relies on are typed; everything else the service
//! returns is kept in `extra`.

use crate::types::{JsonObject, JsonValue};
use serde::Deserialize;

/// An ingestion job
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IngestionJob {
    /// Job identifier
    pub job_id: String,
    /// Lifecycle status (`running`, `completed`, `failed`, ...)
    #[serde(default)]
    pub status: Option<String>,
    /// `catalog.schema.table`
    #[serde(default)]
    pub target_table: Option<String>,
    /// Source file location(s)
    #[serde(default)]
    pub source_data_files: Option<String>,
    /// Engine that runs the job
    #[serde(default)]
    pub engine_id: Option<String>,
    /// User that submitted the job
    #[serde(default)]
    pub username: Option<String>,
    /// Submission time, epoch milliseconds
    #[serde(default)]
    pub start_timestamp: Option<JsonValue>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Continuation for the next page of ingestion jobs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NextPage {
    /// Token to pass as `start`
    #[serde(default)]
    pub start: Option<String>,
}

/// One page of ingestion jobs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IngestionJobCollection {
    /// Jobs in this page
    #[serde(default)]
    pub ingestion_jobs: Vec<IngestionJob>,
    /// Present when more jobs exist
    #[serde(default)]
    pub next: Option<NextPage>,
    /// Link to the first page
    #[serde(default)]
    pub first: Option<JsonValue>,
}

/// A registered storage bucket
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BucketRegistration {
    /// Bucket identifier
    pub bucket_id: String,
    /// Name shown in the console
    #[serde(default)]
    pub bucket_display_name: Option<String>,
    /// Storage type
    #[serde(default)]
    pub bucket_type: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// `ibm` or `customer`
    #[serde(default)]
    pub managed_by: Option<String>,
    /// Catalog bound to the bucket
    #[serde(default)]
    pub associated_catalog: Option<JsonValue>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Remaining fields
    #[serde(flatten)]
    pub extra: JsonObject,
}
