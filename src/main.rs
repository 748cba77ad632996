use bharat_digital::logging::{init_tracing, shutdown_tracer};
use bharat_digital::server;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let result = server::run().await;
    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "Server exited with error");
    }

    shutdown_tracer().await;
    result
}
