use axum::Router;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use afterparty::config::Config;
use afterparty::handlers;

#[derive(Parser, Debug)]
#[command(name = "afterparty")]
#[command(about = "Keeps a Google Sheets guest list in sync with Stripe checkouts")]
struct Cli {
    /// Run one full guest list sync and exit instead of serving webhooks
    #[arg(long)]
    sync_once: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "afterparty=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let state = afterparty::build_live_state(&config).unwrap_or_else(|e| {
        tracing::error!("{}", e);
        std::process::exit(1);
    });

    tracing::info!(
        "Tracking {} payment link(s), writing to spreadsheet {} (tab {})",
        config.guest_list.payment_links.len(),
        config.guest_list.spreadsheet_id,
        config.sheet_name
    );

    if cli.sync_once {
        match state.sync.run().await {
            Ok(report) => {
                tracing::info!("Sync complete: {} guest(s)", report.guests);
                return;
            }
            Err(e) => {
                tracing::error!("Sync failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    let app: Router = handlers::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Afterparty listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
