//! List every ingestion job of a watsonx.data instance
//!
//! Usage: `cargo run --example list_ingestion_jobs -- config.yaml`
//!
//! ```yaml
//! service_url: https://us-south.lakehouse.cloud.ibm.com/lakehouse/api
//! auth_instance_id: crn:v1:bluemix:public:lakehouse:us-south:a/...
//! auth:
//!   type: iam
//!   apikey: <api key>
//! retry:
//!   enabled: true
//! ```

use futures::StreamExt;
use watsonx_data::service::ListIngestionJobsParams;
use watsonx_data::{ServiceConfig, WatsonxData};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> watsonx_data::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "watsonx_data.yaml".to_string());
    let config = ServiceConfig::from_file(&path)?;
    let service = WatsonxData::from_config(&config)?;

    let pager = service.ingestion_jobs_pager(ListIngestionJobsParams::default().jobs_per_page(50))?;
    let mut pages = Box::pin(pager.into_stream());

    let mut total = 0;
    while let Some(page) = pages.next().await {
        for job in page? {
            total += 1;
            println!(
                "{:<36} {:<12} {}",
                job.job_id,
                job.status.as_deref().unwrap_or("-"),
                job.target_table.as_deref().unwrap_or("-")
            );
        }
    }
    println!("{total} ingestion jobs");
    Ok(())
}
