use std::sync::Arc;

use anyhow::Context;
use bharat_cache::{CacheConfig, RecordStore, RedisCache};
use bharat_config::{CorsConfig, ScheduleConfig, ServerConfig, UpstreamConfig};
use bharat_ingest::{DataGovClient, StatsSource};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::metrics::{init_metrics, metrics_app};
use crate::router::init_router;
use crate::scheduler::{CronScheduler, Pipeline, PipelineError};
use crate::state::AppState;

/// Boots the service and blocks until shutdown completes.
pub async fn run() -> anyhow::Result<()> {
    let server_config = ServerConfig::from_env();
    let cache_config = CacheConfig::from_env();
    let upstream_config = UpstreamConfig::from_env();
    let schedule_config = ScheduleConfig::from_env();
    let cors_config = CorsConfig::from_env();

    let cache = RedisCache::new(&cache_config.redis_url)
        .await
        .context("connecting to Redis")?;
    cache.ping().await.context("pinging Redis")?;
    info!("Connected to Redis");

    let store: Arc<dyn RecordStore> = Arc::new(cache);
    let source: Arc<dyn StatsSource> =
        Arc::new(DataGovClient::new(&upstream_config).context("building upstream client")?);
    let pipeline = Arc::new(Pipeline::from_config(
        source,
        Arc::clone(&store),
        &upstream_config,
        &schedule_config,
    ));

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    // Recorder is installed before the scheduler or startup run can emit.
    if let Some(handle) = init_metrics().context("installing Prometheus recorder")? {
        let metrics_addr = format!("0.0.0.0:{}", server_config.metrics_port);
        let listener = TcpListener::bind(&metrics_addr)
            .await
            .with_context(|| format!("binding metrics listener on {metrics_addr}"))?;
        let token = shutdown.clone();
        info!(addr = %metrics_addr, "Metrics server listening");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle))
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await
            {
                error!(error = %e, "Metrics server failed");
            }
        });
    }

    let cron = CronScheduler::start(Arc::clone(&pipeline), &schedule_config, shutdown.clone())
        .await?;

    if schedule_config.run_on_startup {
        match pipeline.spawn(shutdown.clone()) {
            Ok(_) => info!("Startup pipeline run started"),
            Err(PipelineError::AlreadyRunning) => warn!("Startup run skipped: run in progress"),
        }
    }

    let state = AppState::new(
        store,
        pipeline,
        schedule_config,
        cors_config,
        shutdown.clone(),
    );
    let app = init_router(state);

    let addr = server_config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(addr = %addr, "Server listening");

    let token = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
    });

    tokio::select! {
        res = &mut server => {
            res.context("server task failed")?.context("serving HTTP")?;
        }
        _ = shutdown.cancelled() => {
            match tokio::time::timeout(server_config.shutdown_grace, &mut server).await {
                Ok(res) => res.context("server task failed")?.context("serving HTTP")?,
                Err(_) => {
                    warn!(
                        grace_secs = server_config.shutdown_grace.as_secs(),
                        "Grace period elapsed; aborting in-flight requests"
                    );
                    server.abort();
                }
            }
        }
    }

    if let Err(e) = cron.shutdown().await {
        error!(error = %e, "Failed to stop cron scheduler");
    }
    info!("Server stopped");

    Ok(())
}

/// Cancels `token` on SIGINT or SIGTERM.
pub async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    token.cancel();
}
