use dotenvy::dotenv;
use anyhow::Context;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use std::sync::Arc;
mod handlers {
    pub mod contact_dtos;
    pub mod contact_handlers;
}
mod utils {
    pub mod mailer;
    pub mod sanitize;
}
mod config;
mod error;
use config::ContactConfig;
use handlers::contact_handlers;
use utils::mailer::{LeadMailer, SmtpMailer};

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    config: ContactConfig,
    mailer: Arc<dyn LeadMailer>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let index = format!("{}/index.html", state.config.frontend_dist);
    let frontend = ServeDir::new(&state.config.frontend_dist).fallback(ServeFile::new(index));
    Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/contact",
            post(contact_handlers::send_lead).fallback(contact_handlers::method_not_allowed),
        )
        .fallback_service(frontend)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guard = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ssd_landing_backend=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = ContactConfig::from_env()?;
    let mailer = SmtpMailer::new(&config.smtp)?;
    let port = config.port;
    let state = Arc::new(AppState {
        config,
        mailer: Arc::new(mailer),
    });
    let app = build_router(state);

    use tokio::net::TcpListener;
    tracing::info!("Starting server on port {}", port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
