use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vaidya_dhara::api::{api_router, ApiContext};
use vaidya_dhara::config::{self, Config};
use vaidya_dhara::db::Database;
use vaidya_dhara::engine::{AnswerEngine, HttpAnswerEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let cfg = Config::from_env();

    if let Some(dir) = cfg.db_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let db = Database::open(&cfg.db_path)?;

    // The engine client is blocking; construct and probe it off the
    // async runtime. A dead engine is not fatal: the chat path degrades
    // to its fallback answer until the engine comes back.
    let engine_cfg = cfg.clone();
    let engine: Arc<dyn AnswerEngine> = tokio::task::spawn_blocking(move || {
        let engine = HttpAnswerEngine::new(
            &engine_cfg.engine_url,
            &engine_cfg.engine_model,
            engine_cfg.engine_timeout,
        );
        if let Err(e) = engine.initialize() {
            tracing::warn!(error = %e, "Answering engine not ready at startup");
        }
        Arc::new(engine) as Arc<dyn AnswerEngine>
    })
    .await?;

    let ctx = ApiContext::new(engine, db);
    let app = api_router(ctx);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(addr = %cfg.bind_addr, "Gateway listening");
    axum::serve(listener, app).await?;

    Ok(())
}
