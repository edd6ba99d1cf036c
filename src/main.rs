use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use completion_gateway::clock::{Clock, SystemClock};
use completion_gateway::config::{Args, LogFormat};
use completion_gateway::rate_limit::{WindowCounterStore, sweeper};
use completion_gateway::state::{AppState, Upstream};
use completion_gateway::store::{DurableStore, NoopStore, RedisStore};
use completion_gateway::worker::MarkerQueue;
use completion_gateway::{Result, router};

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutting down");
}

// this is main async function with tokio
#[tokio::main]
async fn main() -> Result<()> {
    // parse cli arguments
    let args = Args::parse();
    init_tracing(args.log_format);
    args.validate()?;

    let store: Arc<dyn DurableStore> = match &args.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url).await?;
            info!("durable markers go to redis");
            Arc::new(store)
        }
        None => {
            info!("no redis url configured, durable markers are discarded");
            Arc::new(NoopStore)
        }
    };

    let client = reqwest::Client::builder()
        .connect_timeout(args.connect_timeout())
        .build()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rate_limiter = Arc::new(WindowCounterStore::new(args.rate_limit, args.rate_window()));
    let markers = MarkerQueue::spawn(store, args.marker_queue);

    // creating shared state
    let state = Arc::new(
        AppState::new(
            client,
            Upstream {
                url: args.upstream_url.clone(),
                api_key: args.api_key.clone(),
            },
            Arc::clone(&rate_limiter),
            markers,
        )
        .with_clock(Arc::clone(&clock))
        .with_marker_prefix(args.marker_prefix.clone()),
    );

    // spawn the eviction sweeper
    tokio::spawn(sweeper(rate_limiter, clock, args.sweep_interval()));

    let app = router(state);

    let addr = args.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "gateway listening");
    info!(upstream = %args.upstream_url, "forwarding admitted requests");
    info!(
        limit = args.rate_limit,
        window_secs = args.rate_window,
        "rate limit per client key"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
