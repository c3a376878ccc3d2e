use crate::db::log::{LogEntry, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use rusqlite::Connection;
use unicode_width::UnicodeWidthStr;

const MAX_OP_WIDTH: usize = 40;

/// ANSI colour for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "init" => Colour::RGB(255, 153, 51),
        "project" => Colour::Cyan,
        "begin" => Colour::Green,
        "end" => Colour::Red,
        _ => Colour::White,
    }
}

fn op_target(entry: &LogEntry) -> String {
    if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// One printable line; only the operation word is coloured.
fn render_line(entry: &LogEntry, id_w: usize, date_w: usize, op_w: usize) -> String {
    let visible = truncate(&op_target(entry), op_w);
    let padding = " ".repeat(op_w.saturating_sub(visible.width()));

    let color = color_for_operation(&entry.operation);
    let colored = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };

    format!(
        "{:>id_w$}: {:<date_w$} | {}{} => {}",
        entry.id,
        entry.date,
        colored,
        padding,
        entry.message,
        id_w = id_w,
        date_w = date_w
    )
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| op_target(e).width())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");
        for entry in &entries {
            println!("{}", render_line(entry, id_w, date_w, op_w));
        }

        Ok(())
    }
}
