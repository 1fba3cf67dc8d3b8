//! Offline dump of the five operational collections into one JSON document.
//!
//! Usage: export_data [OUTPUT_PATH] (default: export.json)

use talentpool_backend::config::init_config;
use talentpool_backend::database::pool::create_pool;
use talentpool_backend::services::archive_service::ArchiveService;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "export.json".to_string());

    let pool = create_pool().await?;
    let archive = ArchiveService::dump(&pool).await?;

    let raw = serde_json::to_vec_pretty(&archive)?;
    tokio::fs::write(&output, raw).await?;

    info!(
        path = %output,
        profiles = archive.profiles.len(),
        jobs = archive.jobs.len(),
        applications = archive.applications.len(),
        categories = archive.job_categories.len(),
        "export complete"
    );
    Ok(())
}
