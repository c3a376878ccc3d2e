use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::tracker::{SessionState, SessionTracker};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::time::{format_duration, format_timestamp};
use ansi_term::Colour;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let clock = SystemClock;
    let store = open_store(cfg)?;

    match SessionTracker::new(&store, &clock).status()? {
        SessionState::Idle => info("No open session."),
        SessionState::Active(record) => println!(
            "▶ {} since {} ({})",
            Colour::Green.paint(record.project.as_str()),
            format_timestamp(&record.begin),
            format_duration(record.duration(clock.now()))
        ),
    }

    Ok(())
}
