use crate::cli::commands::list::records_table;
use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::period::{Period, PeriodKind};
use crate::core::plan::DayKind;
use crate::core::report::{Report, Reporting};
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::date::{day_label, parse_date};
use crate::utils::table::Table;
use crate::utils::time::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        date,
        period,
        accumulate,
        raw,
    } = cmd
    {
        let clock = SystemClock;
        let now = clock.now();
        let today = now.date();

        let reference = match date {
            Some(d) => parse_date(d, today)?,
            None => today,
        };
        let kind: PeriodKind = match period {
            Some(p) => p.parse()?,
            None => cfg.default_period_kind()?,
        };
        let accumulate = *accumulate || (cfg.accumulate && !*raw);

        let plan = cfg.plan.to_plan()?;
        let period = Period::new(reference, kind);
        let store = open_store(cfg)?;
        let reporting = Reporting::new(&store, &clock);
        let report = reporting.period_report(&period, accumulate)?;
        let balance = reporting.period_balance(&plan, &period)?;
        let overtime_to_date = reporting.overtime_to_date(&plan)?;

        let title = match period.kind() {
            PeriodKind::Day => day_label(reference, today),
            _ => period.label(),
        };
        header(&title);

        match &report {
            _ if report.is_empty() => info(format!("No records for {}.", title)),
            Report::Records(records) => print!("{}", records_table(records, now).render()),
            Report::Totals(totals) => {
                let mut table = Table::new(["Project", "Duration"]);
                for (project, duration) in totals {
                    table.add_row(vec![project.clone(), format_duration(*duration)]);
                }
                print!("{}", table.render());
                println!("Total: {}", format_duration(report.total()));
            }
        }

        for day in period.dates() {
            let kind = plan.kind(day);
            if kind != DayKind::Normal {
                println!("{}: {}", day_label(day, today), kind);
            }
        }
        println!("Planned: {}", format_duration(balance.planned));
        println!("Overtime: {}", format_duration(balance.overtime()));
        if let Some(overtime) = overtime_to_date {
            println!("Overtime to date: {}", format_duration(overtime));
        }
    }

    Ok(())
}
