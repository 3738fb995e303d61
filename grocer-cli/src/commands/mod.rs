//! CLI command implementations

pub mod account;
pub mod config;
pub mod dashboard;
pub mod invite;
pub mod logs;
pub mod product;
pub mod warehouse;

use std::path::PathBuf;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use grocer_core::{EntryPoint, GrocerContext, LogEvent, LoggingService, Rehydration};

use crate::output;

/// Environment variable selecting the app directory
pub const DIR_ENV: &str = "GROCER_DIR";
/// Environment variable supplying a password non-interactively
pub const PASSWORD_ENV: &str = "GROCER_PASSWORD";

/// Open the event log for this process
///
/// Returns None if logging fails to initialize (shouldn't block operations).
/// Called once from `main`; commands borrow the same handle, since a second
/// DuckDB instance on the same file does not see the first one's writes.
pub fn get_logger() -> Option<LoggingService> {
    let grocer_dir = get_grocer_dir().ok()?;
    std::fs::create_dir_all(&grocer_dir).ok()?;
    LoggingService::new(&grocer_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the grocer directory from environment or default
pub fn get_grocer_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".grocer"))
        .context("Could not find home directory; set GROCER_DIR")
}

/// Get or create the grocer context
///
/// Reports (and logs) a stored session that could not be restored.
pub fn get_context(logger: &Option<LoggingService>) -> Result<GrocerContext> {
    let grocer_dir = get_grocer_dir()?;

    std::fs::create_dir_all(&grocer_dir)
        .with_context(|| format!("Failed to create grocer directory: {:?}", grocer_dir))?;

    let ctx = GrocerContext::new(&grocer_dir).context("Failed to initialize grocer context")?;

    if let Rehydration::Discarded { reason } = ctx.rehydration() {
        output::warning("Saved session could not be restored; please sign in again.");
        log_event(
            logger,
            LogEvent::new("session_discarded").with_error(reason.clone()),
        );
    }

    Ok(ctx)
}

fn stdin_is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Use the flag value, otherwise prompt for a required field
///
/// Without a terminal the field is left blank so validation can report it.
pub fn required_field(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if !stdin_is_interactive() => Ok(String::new()),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

/// Like `required_field` but an empty answer is accepted
pub fn optional_field(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if !stdin_is_interactive() => Ok(String::new()),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// Prompt with a suggested default
pub fn field_with_default(value: Option<String>, prompt: &str, default: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if !stdin_is_interactive() => Ok(default.to_string()),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?),
    }
}

/// Password from the flag, GROCER_PASSWORD, or a hidden prompt
pub fn password_field(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(p) = value {
        return Ok(p);
    }
    if let Ok(p) = std::env::var(PASSWORD_ENV) {
        return Ok(p);
    }
    if !stdin_is_interactive() {
        return Ok(String::new());
    }
    Ok(Password::new().with_prompt(prompt).interact()?)
}
