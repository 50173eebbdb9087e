use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use floorplan_shared::{EVENT_PATH, FEEDBACK_PATH, HEALTH_PATH, PREDICT_PATH};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

mod handlers;
mod logic;
mod state;

use crate::handlers::{event_handler, feedback_handler, health_handler, predict_handler};
use crate::state::{AppState, DEFAULT_CONTEXT, DEFAULT_HISTORY};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
    /// Number of received events kept in memory.
    #[arg(long, default_value_t = DEFAULT_HISTORY)]
    history: usize,
    /// Number of recent events a prediction looks at.
    #[arg(long, default_value_t = DEFAULT_CONTEXT)]
    context: usize,
    #[arg(long)]
    public_dir: Option<PathBuf>,
}

fn router(state: AppState, public_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route(EVENT_PATH, post(event_handler))
        .route(PREDICT_PATH, get(predict_handler))
        .route(FEEDBACK_PATH, post(feedback_handler))
        .route(HEALTH_PATH, get(health_handler));
    if let Some(public_dir) = public_dir {
        app = app
            .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true));
    }
    app.layer(CorsLayer::permissive()).with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let state = AppState::new(args.history, args.context);
    let app = router(state, args.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("Prediction backend running at http://localhost:{}", args.port);
    axum::serve(listener, app).await.context("server crashed")?;
    Ok(())
}
