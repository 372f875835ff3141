pub mod app;
pub mod cli;
pub mod data;
pub mod domain;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::events::SessionEvent;
use app::session::{ForecastSession, SessionOptions};
use app::summary::{SummaryView, render_summary};
use cli::{Cli, ShiftArg};
use data::forecast::VisualCrossingClient;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let location = cli
        .location()
        .context("--lat and --lon must be provided together")?;
    let api_key = cli.api_key()?;

    let provider = match &cli.forecast_url {
        Some(url) => VisualCrossingClient::with_base_url(url.clone(), api_key, cli.units()),
        None => VisualCrossingClient::new(api_key, cli.units()),
    }
    .context("failed to build forecast client")?;

    let mut session = ForecastSession::new(
        Arc::new(provider),
        SessionOptions {
            layout: cli.layout(),
            today: cli.today(),
        },
    );
    if let Some(weekday) = cli.weekday() {
        apply(&mut session, |session, tx| session.select_weekday(weekday, tx)).await?;
    }
    apply(&mut session, |session, tx| {
        session.set_location(location, tx);
        true
    })
    .await?;

    for shift in &cli.shift {
        let forward = *shift == ShiftArg::Forward;
        apply(&mut session, |session, tx| session.shift(forward, tx)).await?;
        info!(forward, outcome = ?session.last_shift(), "week shift applied");
    }

    let view = SummaryView {
        slot: cli.time_of_day(),
        category: cli.category(),
        units: cli.units(),
        icons: cli.icon_mode(),
    };
    println!("{}", render_summary(&session, view));
    Ok(())
}

/// Runs one session operation on a fresh channel and handles its events until
/// nothing is outstanding. The local sender is dropped first, so a fetch task
/// that dies without reporting closes the channel instead of hanging.
async fn apply<F>(session: &mut ForecastSession, operation: F) -> Result<bool>
where
    F: FnOnce(&mut ForecastSession, &mpsc::Sender<SessionEvent>) -> bool,
{
    let (tx, mut rx) = mpsc::channel::<SessionEvent>(8);
    let started = operation(session, &tx);
    drop(tx);

    while session.is_busy() {
        let event = rx
            .recv()
            .await
            .context("session event channel closed")?;
        if !session.handle_event(event) {
            debug!("superseded event ignored");
        }
    }
    Ok(started)
}
