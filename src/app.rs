use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::time::timeout;
use tokio_cron_scheduler::JobScheduler;

use crate::{
    classifier::WebhookClient,
    config::AppConfig,
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    tasks::scheduler::configure_sweep_job,
    web::{self, AppState, SessionStore},
};

pub struct LeadPageApp {
    paths: ResolvedPaths,
    scheduler: JobScheduler,
    state: Arc<AppState>,
    shutdown: Shutdown,
}

impl LeadPageApp {
    pub async fn initialize(
        config: AppConfig,
        paths: ResolvedPaths,
        shutdown: Shutdown,
    ) -> Result<Self> {
        let config = Arc::new(config);

        let http_client = Client::builder()
            .user_agent(format!("prestige-leads/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let classifier = Arc::new(WebhookClient::new(http_client, config.classifier.clone()));
        let sessions = Arc::new(SessionStore::with_capacity(config.sessions.capacity));

        let scheduler = configure_sweep_job(
            &config.sessions.sweep_cron,
            sessions.clone(),
            config.sessions.ttl,
        )
        .await?;

        let state = Arc::new(AppState {
            sessions,
            classifier,
            config,
        });

        Ok(Self {
            paths,
            scheduler,
            state,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let LeadPageApp {
            paths,
            mut scheduler,
            state,
            shutdown,
        } = self;

        let bind_addr = state.config.bind_addr;
        let listener = tokio::net::TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("failed to bind {bind_addr}"))?;

        tracing::info!(
            target: "web",
            addr = %bind_addr,
            webhook = %state.config.classifier.webhook_url,
            "lead page listening"
        );

        if !paths.static_dir.is_dir() {
            tracing::warn!(
                target: "web",
                path = %paths.static_dir.display(),
                "static directory not found; stylesheet will not be served"
            );
        }

        let router = web::router(state, &paths.static_dir);
        let stop = shutdown.subscribe();
        let served = axum::serve(listener, router)
            .with_graceful_shutdown(stop.notified())
            .await;

        shutdown.trigger();
        let shutdown_timeout = Duration::from_secs(5);

        match timeout(shutdown_timeout, scheduler.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::error!(target: "scheduler", ?err, "scheduler shutdown failed");
            }
            Err(_) => {
                tracing::warn!(
                    target: "scheduler",
                    "scheduler did not stop within {:?}",
                    shutdown_timeout
                );
            }
        }

        served.context("http server terminated with an error")?;
        tracing::info!("lead page stopped");
        Ok(())
    }
}
