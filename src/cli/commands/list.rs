use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::report::Reporting;
use crate::errors::AppResult;
use crate::models::record::Record;
use crate::ui::messages::info;
use crate::utils::date::day_label;
use crate::utils::table::Table;
use crate::utils::time::format_duration;
use chrono::{NaiveDate, NaiveDateTime};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { project, open } = cmd {
        let clock = SystemClock;
        let store = open_store(cfg)?;
        let reporting = Reporting::new(&store, &clock);

        let records = if *open {
            reporting.list_open()?
        } else {
            reporting.list_all(project.as_deref())?
        };

        if records.is_empty() {
            info("No records found.");
            return Ok(());
        }

        print!("{}", records_table(&records, clock.now()).render());
    }

    Ok(())
}

fn format_moment(ts: &NaiveDateTime, today: NaiveDate) -> String {
    format!("{} {}", day_label(ts.date(), today), ts.format("%H:%M"))
}

/// `# | Project | Begin | End | Duration`; open records show `--:--` and a `*`.
pub(crate) fn records_table(records: &[Record], now: NaiveDateTime) -> Table {
    let today = now.date();
    let mut table = Table::new(["#", "Project", "Begin", "End", "Duration"]);

    for r in records {
        let end = match &r.end {
            Some(end) => format_moment(end, today),
            None => "--:--".to_string(),
        };
        let mut duration = format_duration(r.duration(now));
        if r.is_open() {
            duration.push('*');
        }

        table.add_row(vec![
            r.id.to_string(),
            r.project.clone(),
            format_moment(&r.begin, today),
            end,
            duration,
        ]);
    }
    table
}
