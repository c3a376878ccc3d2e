use crate::cli::commands::{audit, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::tracker::SessionTracker;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{format_duration, format_timestamp, parse_timestamp};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::End { project, at } = cmd {
        let clock = SystemClock;
        let now = clock.now();
        let end = parse_timestamp(at.as_deref(), now)?;

        let store = open_store(cfg)?;
        let record = SessionTracker::new(&store, &clock).end(project.as_deref(), end)?;

        let when = format_timestamp(&end);
        let worked = format_duration(record.duration(now));
        audit(
            &store,
            "end",
            &record.project,
            &format!("Session #{} closed at {} ({})", record.id, when, worked),
        );
        success(format!(
            "Stopped '{}' at {} after {}.",
            record.project, when, worked
        ));
    }

    Ok(())
}
