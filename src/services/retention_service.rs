use crate::error::Result;
use crate::services::profile_service::ProfileService;
use reqwest::Client;
use serde_json::json;
use tracing::warn;

/// Data-retention sweep: finds profiles untouched for longer than the
/// configured window and posts a reminder email request per profile to the
/// external email webhook. Delivery failures are counted, not retried.
#[derive(Clone)]
pub struct RetentionService {
    client: Client,
    webhook_url: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SweepOutcome {
    pub scanned: usize,
    pub notified: usize,
    pub failed: usize,
}

impl RetentionService {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    pub async fn run_sweep(&self, profiles: &ProfileService) -> Result<SweepOutcome> {
        let config = crate::config::get_config();
        let stale = profiles.list_stale(config.retention_days).await?;

        let mut notified = 0;
        let mut failed = 0;
        if let Some(url) = self.webhook_url.as_deref() {
            for profile in &stale {
                let payload = json!({
                    "template": "data_retention_reminder",
                    "to": profile.email,
                    "name": profile.name,
                    "profile_id": profile.id,
                });
                match self.client.post(url).json(&payload).send().await {
                    Ok(resp) if resp.status().is_success() => notified += 1,
                    Ok(resp) => {
                        warn!(status = %resp.status(), email = %profile.email, "retention email rejected");
                        failed += 1;
                    }
                    Err(err) => {
                        warn!(error = %err, email = %profile.email, "retention email failed");
                        failed += 1;
                    }
                }
            }
        } else {
            warn!("EMAIL_WEBHOOK_URL not configured; retention sweep only scanned");
        }

        Ok(SweepOutcome {
            scanned: stale.len(),
            notified,
            failed,
        })
    }
}
