//! Logs command - inspect and prune the client event log

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use grocer_core::services::logging::now_ms;
use grocer_core::services::{LogEntry, LogFilter};
use grocer_core::LoggingService;
use serde_json::json;

use crate::output;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent events
    List {
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Only events that recorded an error
        #[arg(long, conflicts_with = "session")]
        errors: bool,
        /// Only events of one sign-in (fingerprint from `grocer whoami`)
        #[arg(long)]
        session: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete old events
    Clear {
        /// Keep the last N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Do not ask for confirmation
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Counts per event and where the log lives
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Runs against the process-wide logger so this command's own event is visible
pub fn run(logger: &Option<LoggingService>, command: LogsCommands) -> Result<()> {
    let service = logger
        .as_ref()
        .context("Event log could not be opened; check the grocer directory")?;

    match command {
        LogsCommands::List {
            limit,
            errors,
            session,
            json,
        } => {
            let filter = match (&session, errors) {
                (Some(fingerprint), _) => LogFilter::Session(fingerprint.as_str()),
                (None, true) => LogFilter::Errors,
                (None, false) => LogFilter::All,
            };
            list(service, filter, limit, json)
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => clear(service, older_than_days, force, json),
        LogsCommands::Stats { json } => stats(service, json),
    }
}

fn local_time(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp_ms.to_string(),
    }
}

/// Command and view joined for the Context column
fn context(entry: &LogEntry) -> String {
    match (entry.command.as_deref(), entry.view.as_deref()) {
        (Some(command), Some(view)) => format!("{} @ {}", command, view),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

fn list(service: &LoggingService, filter: LogFilter<'_>, limit: usize, json: bool) -> Result<()> {
    let entries = service.query(filter, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Event", "Context", "Session", "Error"]);
    for entry in &entries {
        let error = match (&entry.error_details, &entry.error_message) {
            (Some(kind), _) => kind.red().to_string(),
            (None, Some(_)) => "!".red().to_string(),
            (None, None) => String::new(),
        };
        table.add_row(vec![
            local_time(entry.timestamp),
            entry.event.clone(),
            context(entry),
            entry.session.clone().unwrap_or_default(),
            error,
        ]);
    }
    println!("{}", table);

    // Full messages are too wide for the table
    if filter == LogFilter::Errors {
        for entry in &entries {
            if let Some(message) = &entry.error_message {
                println!("{} {}", local_time(entry.timestamp).dimmed(), message);
            }
        }
    }
    Ok(())
}

fn clear(service: &LoggingService, older_than_days: u64, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete events older than {} day(s)?",
                older_than_days
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Nothing deleted.");
            return Ok(());
        }
    }

    let cutoff = now_ms() - older_than_days as i64 * DAY_MS;
    let deleted = service.delete_before(cutoff)?;

    if json {
        println!("{}", json!({ "deleted": deleted }));
    } else {
        output::success(&format!("Deleted {} event(s).", deleted));
    }
    Ok(())
}

fn stats(service: &LoggingService, json: bool) -> Result<()> {
    let total = service.count()?;
    let errors = service.count_errors()?;
    let by_event = service.event_counts()?;
    let path = service.db_path();
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "total": total,
                "errors": errors,
                "byEvent": by_event,
                "path": path.to_string_lossy(),
                "sizeBytes": size,
            }))?
        );
        return Ok(());
    }

    println!("{}", "Event log".bold());
    println!("  {} event(s), {} with errors", total, errors);
    println!("  {} ({})", path.display(), output::format_size(size));

    if !by_event.is_empty() {
        let mut table = output::create_table();
        table.set_header(vec!["Event", "Count"]);
        for row in &by_event {
            table.add_row(vec![row.event.clone(), row.count.to_string()]);
        }
        println!("{}", table);
    }
    Ok(())
}
