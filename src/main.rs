use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pull_request_monitor::ci::CircleCiClient;
use pull_request_monitor::server::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pull_request_monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Credentials are read once here and injected; nothing else touches
    // the environment.
    let github_token = std::env::var("GITHUB_TOKEN").expect("GITHUB_TOKEN must be set");
    let circle_token =
        std::env::var("CIRCLE_CI_AUTH_TOKEN").expect("CIRCLE_CI_AUTH_TOKEN must be set");
    let webhook_secret = std::env::var("WEBHOOK_SECRET").expect("WEBHOOK_SECRET must be set");
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let github = octocrab::Octocrab::builder()
        .personal_token(github_token)
        .build()
        .expect("failed to build GitHub client");
    let ci = CircleCiClient::new(circle_token);

    let app = build_router(AppState::new(webhook_secret.into_bytes(), github, ci));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
