//! mastodon-stream: follow a streaming timeline and log every event.

use anyhow::Context;
use mastodon_api::{StreamingClient, Timeline};
use mastodon_common::Config;
use mastodon_core::{StreamEvent, dispatch};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, shutting down...");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}

/// Log one resolved event.
fn log_event(event: &StreamEvent) {
    match event {
        StreamEvent::Update(status) => {
            info!(
                id = %status.id,
                account = %status.account.acct,
                reblog = status.is_reblog(),
                "update"
            );
        }
        StreamEvent::Notification(notification) => {
            info!(
                id = %notification.id,
                kind = ?notification.notification_type,
                account = %notification.account.acct,
                "notification"
            );
        }
        StreamEvent::Delete(deleted) => {
            info!(id = ?deleted.id.as_ref().map(ToString::to_string), "delete");
        }
        StreamEvent::Unrecognized { .. } => {}
    }

    if tracing::enabled!(tracing::Level::TRACE) {
        if let Ok(json) = serde_json::to_string(event) {
            tracing::trace!(event = %json, "Event payload");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mastodon=debug,mastodon_api=info".into()),
        )
        .init();

    let config = Config::load().context("failed to load configuration")?;
    let timeline = Timeline::from_config(&config.streaming)?;

    info!(
        instance = %config.instance.base_url,
        timeline = timeline.path(),
        "Starting mastodon-stream"
    );

    let streaming = StreamingClient::new(&config)?;
    let messages = streaming.connect(&timeline).await?;

    tokio::select! {
        summary = dispatch(messages, |event| log_event(&event)) => {
            info!(
                recognized = summary.recognized,
                unrecognized = summary.unrecognized,
                "Stream ended"
            );
        }
        () = shutdown_signal() => {}
    }

    Ok(())
}
