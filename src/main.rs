//! Classroom Updates Service — Binary Entrypoint
//! Boots the feed poller and the Axum HTTP server.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use classroom_updates::api::{create_router, AppState};
use classroom_updates::broadcast::UpdatesHandle;
use classroom_updates::config::FeedConfig;
use classroom_updates::feed::source::{FeedSource, HttpFeedSource};
use classroom_updates::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("classroom_updates=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = FeedConfig::load();
    let metrics = Metrics::init(cfg.poll_interval.as_secs());

    let source: Option<Box<dyn FeedSource>> = match &cfg.feed_url {
        Some(url) => {
            tracing::info!(url = %url, "updates feed configured");
            Some(Box::new(HttpFeedSource::new(url.clone())))
        }
        None => {
            tracing::warn!("no updates feed URL configured, serving an empty feed");
            None
        }
    };

    let updates = UpdatesHandle::new(source);
    let poller = updates.spawn_poller(cfg.poll_interval);

    let state = AppState {
        updates: updates.clone(),
    };
    let app = create_router(state).merge(metrics.router());

    tracing::info!(addr = %cfg.bind_addr, "listening");
    let listener = tokio::net::TcpListener::bind(cfg.bind_addr).await?;
    let result = axum::serve(listener, app).await;

    // Stop the recurring refresh before tearing down.
    poller.abort();

    result.map_err(Into::into)
}
