//! watsonx.data service client
//!
//! [`WatsonxData`] exposes one typed method per supported operation. Every
//! method converts its parameter struct into [`CallParams`] and goes through
//! [`WatsonxData::call`].
//!
//! # Example
//!
//! ```rust,ignore
//! use watsonx_data::service::{ListIngestionJobsParams, WatsonxData};
//!
//! let service = WatsonxData::from_config(&config)?;
//! let mut pager = service.ingestion_jobs_pager(ListIngestionJobsParams::default())?;
//! while pager.has_next() {
//!     for job in pager.get_next().await? {
//!         println!("{} {:?}", job.job_id, job.status);
//!     }
//! }
//! ```

mod models;
pub mod operations;
mod params;

pub use models::{BucketRegistration, IngestionJob, IngestionJobCollection, NextPage};
pub use params::*;

use crate::auth::{Authenticate, Authenticator};
use crate::config::{ServiceConfig, ServiceOptions};
use crate::error::Result;
use crate::http::{DetailedResponse, HttpClient, Transport};
use crate::pagination::{PageSpec, Pager, TokenSource};
use crate::request::CallParams;
use serde_json::Value;
use std::sync::Arc;

/// Client for the watsonx.data lakehouse API
#[derive(Debug, Clone)]
pub struct WatsonxData {
    client: HttpClient,
}

impl WatsonxData {
    /// Create a client using the reqwest transport
    pub fn new(options: &ServiceOptions, authenticator: Arc<dyn Authenticate>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(options, authenticator)?,
        })
    }

    /// Create a client with a custom transport
    pub fn with_transport(
        options: &ServiceOptions,
        authenticator: Arc<dyn Authenticate>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_transport(options, authenticator, transport)?,
        })
    }

    /// Create a client from a configuration document
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let authenticator = Authenticator::new(config.auth.clone());
        authenticator.validate()?;
        Self::new(&config.options(), Arc::new(authenticator))
    }

    /// Underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Send the operation bound to `params`
    pub async fn call<P: OperationParams>(&self, params: &P) -> Result<DetailedResponse<Value>> {
        let call_params: CallParams = params.call_params()?;
        self.client.call(P::operation(), &call_params).await
    }

    // ========================================================================
    // Bucket Registrations
    // ========================================================================

    /// List registered buckets
    pub async fn list_bucket_registrations(
        &self,
        params: &ListBucketRegistrationsParams,
    ) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    /// Register a bucket
    pub async fn create_bucket_registration(
        &self,
        params: &CreateBucketRegistrationParams,
    ) -> Result<DetailedResponse<BucketRegistration>> {
        self.call(params).await?.into_typed()
    }

    /// Get a registered bucket
    pub async fn get_bucket_registration(
        &self,
        params: &GetBucketRegistrationParams,
    ) -> Result<DetailedResponse<BucketRegistration>> {
        self.call(params).await?.into_typed()
    }

    /// Update a registered bucket with a merge patch
    pub async fn update_bucket_registration(
        &self,
        params: &UpdateBucketRegistrationParams,
    ) -> Result<DetailedResponse<BucketRegistration>> {
        self.call(params).await?.into_typed()
    }

    /// Deregister a bucket
    pub async fn delete_bucket_registration(
        &self,
        params: &DeleteBucketRegistrationParams,
    ) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    // ========================================================================
    // Database Registrations
    // ========================================================================

    /// List registered databases
    pub async fn list_database_registrations(
        &self,
        params: &ListDatabaseRegistrationsParams,
    ) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    /// Get a registered database
    pub async fn get_database(&self, params: &GetDatabaseParams) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    // ========================================================================
    // Engines
    // ========================================================================

    /// List Presto engines
    pub async fn list_presto_engines(
        &self,
        params: &ListPrestoEnginesParams,
    ) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    /// List Milvus services
    pub async fn list_milvus_services(
        &self,
        params: &ListMilvusServicesParams,
    ) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    // ========================================================================
    // Catalogs, Schemas and Tables
    // ========================================================================

    /// List catalogs
    pub async fn list_catalogs(&self, params: &ListCatalogsParams) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    /// Get a catalog
    pub async fn get_catalog(&self, params: &GetCatalogParams) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    /// List the schemas of a catalog as seen by an engine
    pub async fn list_schemas(&self, params: &ListSchemasParams) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    /// List the tables of a schema as seen by an engine
    pub async fn list_tables(&self, params: &ListTablesParams) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    // ========================================================================
    // Ingestion Jobs
    // ========================================================================

    /// List one page of ingestion jobs
    pub async fn list_ingestion_jobs(
        &self,
        params: &ListIngestionJobsParams,
    ) -> Result<DetailedResponse<IngestionJobCollection>> {
        self.call(params).await?.into_typed()
    }

    /// Create an ingestion job from files already in object storage
    pub async fn create_ingestion_job(
        &self,
        params: &CreateIngestionJobParams,
    ) -> Result<DetailedResponse<IngestionJob>> {
        self.call(params).await?.into_typed()
    }

    /// Create an ingestion job from an uploaded file
    pub async fn create_ingestion_job_by_file(
        &self,
        params: &CreateIngestionJobByFileParams,
    ) -> Result<DetailedResponse<IngestionJob>> {
        self.call(params).await?.into_typed()
    }

    /// Get an ingestion job
    pub async fn get_ingestion_job(
        &self,
        params: &GetIngestionJobParams,
    ) -> Result<DetailedResponse<IngestionJob>> {
        self.call(params).await?.into_typed()
    }

    /// Delete an ingestion job
    pub async fn delete_ingestion_job(
        &self,
        params: &DeleteIngestionJobParams,
    ) -> Result<DetailedResponse<Value>> {
        self.call(params).await
    }

    /// Pager over all ingestion jobs
    ///
    /// `params.start` must be left unset; the pager manages it.
    pub fn ingestion_jobs_pager(&self, params: ListIngestionJobsParams) -> Result<Pager<IngestionJob>> {
        Pager::new(
            self.client.clone(),
            ListIngestionJobsParams::operation(),
            params.call_params()?,
            PageSpec::new("ingestion_jobs", "start", TokenSource::field("next.start")),
        )
    }
}
