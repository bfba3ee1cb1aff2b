//! Operation descriptors for the lakehouse v2 API
//!
//! Each static is named after the operation it describes.

#![allow(missing_docs)]

use crate::request::{OperationDescriptor, ParamSpec};
use crate::types::{Method, AUTH_INSTANCE_ID_HEADER};

const INSTANCE: ParamSpec = ParamSpec::header("auth_instance_id", AUTH_INSTANCE_ID_HEADER);

// ============================================================================
// Bucket Registrations
// ============================================================================

pub static LIST_BUCKET_REGISTRATIONS: OperationDescriptor = OperationDescriptor::new(
    "list_bucket_registrations",
    Method::GET,
    "/v2/bucket_registrations",
    &[INSTANCE],
);

pub static CREATE_BUCKET_REGISTRATION: OperationDescriptor = OperationDescriptor::new(
    "create_bucket_registration",
    Method::POST,
    "/v2/bucket_registrations",
    &[
        ParamSpec::body("bucket_type").required(),
        ParamSpec::body("description").required(),
        ParamSpec::body("managed_by").required(),
        ParamSpec::body("associated_catalog").required(),
        ParamSpec::body("bucket_details"),
        ParamSpec::body("bucket_display_name"),
        ParamSpec::body("region"),
        ParamSpec::body("tags"),
        INSTANCE,
    ],
);

pub static GET_BUCKET_REGISTRATION: OperationDescriptor = OperationDescriptor::new(
    "get_bucket_registration",
    Method::GET,
    "/v2/bucket_registrations/{bucket_id}",
    &[ParamSpec::path("bucket_id"), INSTANCE],
);

pub static UPDATE_BUCKET_REGISTRATION: OperationDescriptor = OperationDescriptor::new(
    "update_bucket_registration",
    Method::PATCH,
    "/v2/bucket_registrations/{bucket_id}",
    &[
        ParamSpec::path("bucket_id"),
        ParamSpec::body("bucket_details"),
        ParamSpec::body("bucket_display_name"),
        ParamSpec::body("description"),
        ParamSpec::body("tags"),
        INSTANCE,
    ],
);

pub static DELETE_BUCKET_REGISTRATION: OperationDescriptor = OperationDescriptor::new(
    "delete_bucket_registration",
    Method::DELETE,
    "/v2/bucket_registrations/{bucket_id}",
    &[ParamSpec::path("bucket_id"), INSTANCE],
)
.idempotent();

// ============================================================================
// Database Registrations
// ============================================================================

pub static LIST_DATABASE_REGISTRATIONS: OperationDescriptor = OperationDescriptor::new(
    "list_database_registrations",
    Method::GET,
    "/v2/database_registrations",
    &[INSTANCE],
);

pub static GET_DATABASE: OperationDescriptor = OperationDescriptor::new(
    "get_database",
    Method::GET,
    "/v2/database_registrations/{database_id}",
    &[ParamSpec::path("database_id"), INSTANCE],
);

// ============================================================================
// Engines
// ============================================================================

pub static LIST_PRESTO_ENGINES: OperationDescriptor = OperationDescriptor::new(
    "list_presto_engines",
    Method::GET,
    "/v2/presto_engines",
    &[INSTANCE],
);

pub static LIST_MILVUS_SERVICES: OperationDescriptor = OperationDescriptor::new(
    "list_milvus_services",
    Method::GET,
    "/v2/milvus_services",
    &[INSTANCE],
);

// ============================================================================
// Catalogs, Schemas and Tables
// ============================================================================

pub static LIST_CATALOGS: OperationDescriptor = OperationDescriptor::new(
    "list_catalogs",
    Method::GET,
    "/v2/catalogs",
    &[INSTANCE],
);

pub static GET_CATALOG: OperationDescriptor = OperationDescriptor::new(
    "get_catalog",
    Method::GET,
    "/v2/catalogs/{catalog_id}",
    &[ParamSpec::path("catalog_id"), INSTANCE],
);

pub static LIST_SCHEMAS: OperationDescriptor = OperationDescriptor::new(
    "list_schemas",
    Method::GET,
    "/v2/catalogs/{catalog_id}/schemas",
    &[
        ParamSpec::path("catalog_id"),
        ParamSpec::query("engine_id").required(),
        INSTANCE,
    ],
);

pub static LIST_TABLES: OperationDescriptor = OperationDescriptor::new(
    "list_tables",
    Method::GET,
    "/v2/catalogs/{catalog_id}/schemas/{schema_id}/tables",
    &[
        ParamSpec::path("catalog_id"),
        ParamSpec::path("schema_id"),
        ParamSpec::query("engine_id").required(),
        INSTANCE,
    ],
);

// ============================================================================
// Ingestion Jobs
// ============================================================================

pub static LIST_INGESTION_JOBS: OperationDescriptor = OperationDescriptor::new(
    "list_ingestion_jobs",
    Method::GET,
    "/v2/ingestion_jobs",
    &[
        ParamSpec::query("start"),
        ParamSpec::query("jobs_per_page"),
        INSTANCE,
    ],
);

pub static CREATE_INGESTION_JOB: OperationDescriptor = OperationDescriptor::new(
    "create_ingestion_job",
    Method::POST,
    "/v2/ingestion_jobs",
    &[
        ParamSpec::body("job_id").required(),
        ParamSpec::body("source_data_files").required(),
        ParamSpec::body("target_table").required(),
        ParamSpec::body("username").required(),
        ParamSpec::body("create_if_not_exist"),
        ParamSpec::body("csv_property"),
        ParamSpec::body("engine_id"),
        ParamSpec::body("partition_by"),
        ParamSpec::body("schema"),
        ParamSpec::body("source_file_type"),
        ParamSpec::body("validate_csv_header"),
        INSTANCE,
    ],
);

pub static CREATE_INGESTION_JOB_BY_FILE: OperationDescriptor = OperationDescriptor::new(
    "create_ingestion_job_by_file",
    Method::POST,
    "/v2/ingestion_jobs_by_file",
    &[
        ParamSpec::form("source_data_file").required(),
        ParamSpec::form("target_table").required(),
        ParamSpec::form("job_id").required(),
        ParamSpec::form("username").required(),
        ParamSpec::form("source_file_type"),
        ParamSpec::form("csv_property"),
        ParamSpec::form("create_if_not_exist"),
        ParamSpec::form("engine_id"),
        INSTANCE,
    ],
);

pub static GET_INGESTION_JOB: OperationDescriptor = OperationDescriptor::new(
    "get_ingestion_job",
    Method::GET,
    "/v2/ingestion_jobs/{job_id}",
    &[ParamSpec::path("job_id"), INSTANCE],
);

pub static DELETE_INGESTION_JOB: OperationDescriptor = OperationDescriptor::new(
    "delete_ingestion_job",
    Method::DELETE,
    "/v2/ingestion_jobs/{job_id}",
    &[ParamSpec::path("job_id"), INSTANCE],
)
.idempotent();
