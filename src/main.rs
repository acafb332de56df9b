use std::sync::Arc;

use anyhow::Result;
use plantrack::{cache::BundleCache, http, source::CsvTableSource};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) configure source + cache ─────────────────────────────────
    let source_path =
        std::env::var("PLANTRACK_SOURCE").unwrap_or_else(|_| "data/plan.csv".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3002);

    info!(source = %source_path, "using sheet");
    let cache = Arc::new(BundleCache::new(Arc::new(CsvTableSource::new(&source_path))));

    // ─── 3) warm the cache ───────────────────────────────────────────
    match cache.get().await {
        Ok(bundle) => info!(
            records = bundle.metadata.record_count,
            overall_compliance = bundle.global_metrics.overall_compliance,
            "initial pipeline run complete"
        ),
        // Serve anyway; requests retry the source until it appears.
        Err(e) => error!(source = %e.source_id, cause = %e.cause, "initial pipeline run failed"),
    }

    // ─── 4) serve ────────────────────────────────────────────────────
    let app = http::router(cache);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
