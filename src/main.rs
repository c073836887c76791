//! carechat - patient/doctor chat mockup
//!
//! A terminal UI over an in-memory session state machine. Nothing is
//! persisted; leaving a conversation restores the seeded example data.

mod config;
mod ids;
mod model;
mod projection;
mod seed;
mod session;
mod state_machine;
mod store;
mod tui;

use config::Config;
use session::Session;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    // Initialize logging (the UI owns stdout, so JSON goes to the log file)
    let json_layer = config.open_log_file()?.map(|file| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(Mutex::new(file))
    });
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carechat=info".into()),
        )
        .with(json_layer)
        .init();

    let session = Session::new(&config)?;
    tracing::info!(
        users = session.store().users().len(),
        conversations = session.store().conversations().len(),
        messages = session.store().message_count(),
        placeholder = %config.placeholder_participant,
        "Session seeded"
    );

    tui::run(session)?;

    tracing::info!("carechat exited");
    Ok(())
}
