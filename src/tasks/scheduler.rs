use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::web::SessionStore;

pub async fn configure_sweep_job(
    cron_spec: &str,
    sessions: Arc<SessionStore>,
    ttl: Duration,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;
    let job = Job::new_async(cron_spec, move |_id, _l| {
        let sessions = sessions.clone();
        Box::pin(async move {
            let removed = sessions.sweep(ttl);
            if removed > 0 {
                tracing::info!(
                    target: "scheduler",
                    removed,
                    remaining = sessions.len(),
                    "expired sessions swept"
                );
            }
        })
    })?;
    scheduler.add(job).await?;
    tracing::info!(
        target: "scheduler",
        cron = %cron_spec,
        ttl_secs = ttl.as_secs(),
        "session sweep registered"
    );
    scheduler.start().await?;
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_invalid_cron_spec() {
        let sessions = Arc::new(SessionStore::default());
        let result = configure_sweep_job("every minute", sessions, Duration::from_secs(60)).await;
        assert!(result.is_err());
    }
}
