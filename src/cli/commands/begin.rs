use crate::cli::commands::{audit, open_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::tracker::SessionTracker;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{format_timestamp, parse_timestamp};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Begin { project, at } = cmd {
        let clock = SystemClock;
        let begin = parse_timestamp(at.as_deref(), clock.now())?;

        let store = open_store(cfg)?;
        let record = SessionTracker::new(&store, &clock).begin(project, begin)?;

        let when = format_timestamp(&record.begin);
        audit(
            &store,
            "begin",
            &record.project,
            &format!("Session #{} started at {}", record.id, when),
        );
        success(format!("Started '{}' at {}.", record.project, when));
    }

    Ok(())
}
