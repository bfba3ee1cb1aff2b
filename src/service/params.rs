//! Typed parameters for each operation
//!
//! Field names are the caller-facing parameter names of the matching
//! [`OperationDescriptor`]. Required fields are not optional; leaving one
//! empty still fails validation before any request is sent.

#![allow(missing_docs)]

use super::operations::*;
use crate::error::Result;
use crate::request::{CallParams, FileData, OperationDescriptor};
use crate::types::{JsonValue, StringMap};
use serde::Serialize;

/// Parameters bound to one operation
pub trait OperationParams: Serialize {
    /// Operation these parameters belong to
    fn operation() -> &'static OperationDescriptor;

    /// Caller header overrides
    fn headers(&self) -> &StringMap;

    /// Convert into untyped call parameters
    fn call_params(&self) -> Result<CallParams> {
        let mut params = CallParams::from_serialize(self)?;
        params.set_headers(self.headers().clone());
        Ok(params)
    }
}

macro_rules! operation_params {
    ($($params:ty => $op:ident),* $(,)?) => {
        $(
            impl OperationParams for $params {
                fn operation() -> &'static OperationDescriptor {
                    &$op
                }

                fn headers(&self) -> &StringMap {
                    &self.headers
                }
            }
        )*
    };
}

operation_params! {
    ListBucketRegistrationsParams => LIST_BUCKET_REGISTRATIONS,
    CreateBucketRegistrationParams => CREATE_BUCKET_REGISTRATION,
    GetBucketRegistrationParams => GET_BUCKET_REGISTRATION,
    UpdateBucketRegistrationParams => UPDATE_BUCKET_REGISTRATION,
    DeleteBucketRegistrationParams => DELETE_BUCKET_REGISTRATION,
    ListDatabaseRegistrationsParams => LIST_DATABASE_REGISTRATIONS,
    GetDatabaseParams => GET_DATABASE,
    ListPrestoEnginesParams => LIST_PRESTO_ENGINES,
    ListMilvusServicesParams => LIST_MILVUS_SERVICES,
    ListCatalogsParams => LIST_CATALOGS,
    GetCatalogParams => GET_CATALOG,
    ListSchemasParams => LIST_SCHEMAS,
    ListTablesParams => LIST_TABLES,
    ListIngestionJobsParams => LIST_INGESTION_JOBS,
    CreateIngestionJobParams => CREATE_INGESTION_JOB,
    GetIngestionJobParams => GET_INGESTION_JOB,
    DeleteIngestionJobParams => DELETE_INGESTION_JOB,
}

// ============================================================================
// Bucket Registrations
// ============================================================================

/// Parameters for `list_bucket_registrations`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListBucketRegistrationsParams {
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

/// Parameters for `create_bucket_registration`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBucketRegistrationParams {
    /// Storage type, e.g. `ibm_cos`, `aws_s3`, `minio`
    pub bucket_type: String,
    pub description: String,
    /// `ibm` or `customer`
    pub managed_by: String,
    /// Catalog created for the bucket (`catalog_name`, `catalog_type`)
    pub associated_catalog: JsonValue,
    /// Bucket name, endpoint and credentials
    pub bucket_details: Option<JsonValue>,
    pub bucket_display_name: Option<String>,
    pub region: Option<String>,
    pub tags: Option<Vec<String>>,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

/// Parameters for `get_bucket_registration`
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetBucketRegistrationParams {
    pub bucket_id: String,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl GetBucketRegistrationParams {
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            ..Self::default()
        }
    }
}

/// Parameters for `update_bucket_registration`
///
/// Only the fields that are set are sent, as a merge patch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateBucketRegistrationParams {
    pub bucket_id: String,
    pub bucket_details: Option<JsonValue>,
    pub bucket_display_name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

/// Parameters for `delete_bucket_registration`
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteBucketRegistrationParams {
    pub bucket_id: String,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

// ============================================================================
// Database Registrations
// ============================================================================

/// Parameters for `list_database_registrations`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListDatabaseRegistrationsParams {
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

/// Parameters for `get_database`
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetDatabaseParams {
    pub database_id: String,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

// ============================================================================
// Engines
// ============================================================================

/// Parameters for `list_presto_engines`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPrestoEnginesParams {
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

/// Parameters for `list_milvus_services`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListMilvusServicesParams {
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

// ============================================================================
// Catalogs, Schemas and Tables
// ============================================================================

/// Parameters for `list_catalogs`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCatalogsParams {
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

/// Parameters for `get_catalog`
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCatalogParams {
    pub catalog_id: String,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

/// Parameters for `list_schemas`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListSchemasParams {
    pub catalog_id: String,
    pub engine_id: String,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl ListSchemasParams {
    pub fn new(catalog_id: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            catalog_id: catalog_id.into(),
            engine_id: engine_id.into(),
            ..Self::default()
        }
    }
}

/// Parameters for `list_tables`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListTablesParams {
    pub catalog_id: String,
    pub schema_id: String,
    pub engine_id: String,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

// ============================================================================
// Ingestion Jobs
// ============================================================================

/// Parameters for `list_ingestion_jobs`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListIngestionJobsParams {
    /// Continuation token from a previous page
    pub start: Option<String>,
    pub jobs_per_page: Option<u32>,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl ListIngestionJobsParams {
    /// Set the page size
    #[must_use]
    pub fn jobs_per_page(mut self, jobs_per_page: u32) -> Self {
        self.jobs_per_page = Some(jobs_per_page);
        self
    }
}

/// Parameters for `create_ingestion_job`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateIngestionJobParams {
    pub job_id: String,
    /// Object storage location(s) of the source files
    pub source_data_files: String,
    /// `catalog.schema.table`
    pub target_table: String,
    pub username: String,
    pub create_if_not_exist: Option<bool>,
    /// Delimiter, encoding, header and quote settings for CSV sources
    pub csv_property: Option<JsonValue>,
    pub engine_id: Option<String>,
    pub partition_by: Option<String>,
    pub schema: Option<String>,
    /// `csv`, `parquet` or `json`
    pub source_file_type: Option<String>,
    pub validate_csv_header: Option<bool>,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

/// Parameters for `create_ingestion_job_by_file`
///
/// The source file is uploaded as a multipart form part.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateIngestionJobByFileParams {
    #[serde(skip)]
    pub source_data_file: Option<FileData>,
    pub target_table: String,
    pub job_id: String,
    pub username: String,
    pub source_file_type: Option<String>,
    /// Sent as JSON text
    pub csv_property: Option<JsonValue>,
    pub create_if_not_exist: Option<bool>,
    pub engine_id: Option<String>,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl OperationParams for CreateIngestionJobByFileParams {
    fn operation() -> &'static OperationDescriptor {
        &CREATE_INGESTION_JOB_BY_FILE
    }

    fn headers(&self) -> &StringMap {
        &self.headers
    }

    fn call_params(&self) -> Result<CallParams> {
        let mut params = CallParams::from_serialize(self)?;
        params.set_headers(self.headers.clone());
        match &self.source_data_file {
            Some(file) => Ok(params.with_file("source_data_file", file.clone())),
            None => Ok(params),
        }
    }
}

/// Parameters for `get_ingestion_job`
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetIngestionJobParams {
    pub job_id: String,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}

impl GetIngestionJobParams {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Self::default()
        }
    }
}

/// Parameters for `delete_ingestion_job`
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteIngestionJobParams {
    pub job_id: String,
    pub auth_instance_id: Option<String>,
    #[serde(skip)]
    pub headers: StringMap,
}
