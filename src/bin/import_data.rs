//! Restore a JSON dump produced by export_data. Upserts every collection;
//! conflict key is `name` for job_categories and `id` for the rest.
//!
//! Usage: import_data [INPUT_PATH] (default: export.json)

use talentpool_backend::config::init_config;
use talentpool_backend::database::pool::create_pool;
use talentpool_backend::services::archive_service::{Archive, ArchiveService};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "export.json".to_string());

    let raw = tokio::fs::read(&input).await?;
    let archive: Archive = serde_json::from_slice(&raw)?;

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    ArchiveService::restore(&pool, &archive).await?;

    info!(
        path = %input,
        exported_at = %archive.exported_at,
        profiles = archive.profiles.len(),
        jobs = archive.jobs.len(),
        applications = archive.applications.len(),
        "import complete"
    );
    Ok(())
}
