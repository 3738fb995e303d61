//! Event log stored in `logs.duckdb` inside the app directory
//!
//! Passwords, tokens and user records are never written. A session shows
//! up only as `token_fingerprint(token)`, so events of one sign-in can be
//! correlated without the token being recoverable.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use duckdb::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::result::Error;
use crate::log_migrations;

const DB_FILE: &str = "logs.duckdb";

const ENTRY_COLUMNS: &str = "id, timestamp, entry_point, app_version, platform, \
     event, view_name, command, session_fingerprint, error_message, error_details";

/// Current unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// First 12 hex digits of the token's SHA-256
pub fn token_fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    hex::encode(&digest[..6])
}

/// Which program wrote an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    /// Another program linking grocer-core
    Embedded,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Embedded => "embedded",
        }
    }
}

/// An event about to be recorded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Self::default()
        }
    }

    /// Route path of the view the event belongs to
    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Tag with the fingerprint of `token`; the token itself is dropped
    pub fn with_session_token(mut self, token: &str) -> Self {
        self.session = Some(token_fingerprint(token));
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }

    /// Record a core error: its message plus its kind as detail
    pub fn with_failure(self, error: &Error) -> Self {
        self.with_error(error.to_string())
            .with_error_details(error.kind())
    }
}

/// A stored entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub view: Option<String>,
    pub command: Option<String>,
    pub session: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

impl LogEntry {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            entry_point: row.get(2)?,
            app_version: row.get(3)?,
            platform: row.get(4)?,
            event: row.get(5)?,
            view: row.get(6)?,
            command: row.get(7)?,
            session: row.get(8)?,
            error_message: row.get(9)?,
            error_details: row.get(10)?,
        })
    }
}

/// Which entries `LoggingService::query` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFilter<'a> {
    All,
    /// Entries carrying an error message
    Errors,
    /// Entries tagged with this token fingerprint
    Session(&'a str),
}

#[derive(Debug, Clone, Serialize)]
pub struct EventCount {
    pub event: String,
    pub count: u64,
}

/// Append-only event log with simple queries for `grocer logs`
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
}

impl LoggingService {
    /// Open (creating if needed) the log in `app_dir` and bring its schema up to date
    pub fn new(app_dir: &Path, entry_point: EntryPoint, app_version: impl Into<String>) -> Result<Self> {
        let db_path = app_dir.join(DB_FILE);
        let mut conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open event log {:?}", db_path))?;
        log_migrations::apply(&mut conn).context("Failed to migrate event log")?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| anyhow!("Event log lock poisoned: {}", e))
    }

    pub fn log(&self, event: LogEvent) -> Result<()> {
        self.conn()?.execute(
            "INSERT INTO sys_logs (timestamp, entry_point, app_version, platform, event, \
             view_name, command, session_fingerprint, error_message, error_details) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                now_ms(),
                self.entry_point.as_str(),
                self.app_version,
                std::env::consts::OS,
                event.event,
                event.view,
                event.command,
                event.session,
                event.error_message,
                event.error_details,
            ],
        )?;
        Ok(())
    }

    /// Shorthand for a `command_executed` event
    pub fn log_command(&self, command: &str) -> Result<()> {
        self.log(LogEvent::new("command_executed").with_command(command))
    }

    /// Newest matching entries first
    pub fn query(&self, filter: LogFilter<'_>, limit: usize) -> Result<Vec<LogEntry>> {
        let (condition, session) = match filter {
            LogFilter::All => ("TRUE", None),
            LogFilter::Errors => ("error_message IS NOT NULL", None),
            LogFilter::Session(fingerprint) => ("session_fingerprint = ?", Some(fingerprint)),
        };
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM sys_logs WHERE {} ORDER BY timestamp DESC, id DESC LIMIT ?",
            ENTRY_COLUMNS, condition
        ))?;
        let limit = limit as i64;
        let entries = match session {
            Some(fingerprint) => stmt
                .query_map(params![fingerprint, limit], LogEntry::from_row)?
                .collect::<duckdb::Result<Vec<_>>>()?,
            None => stmt
                .query_map([limit], LogEntry::from_row)?
                .collect::<duckdb::Result<Vec<_>>>()?,
        };
        Ok(entries)
    }

    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query(LogFilter::All, limit)
    }

    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query(LogFilter::Errors, limit)
    }

    pub fn count(&self) -> Result<u64> {
        self.count_where("TRUE")
    }

    pub fn count_errors(&self) -> Result<u64> {
        self.count_where("error_message IS NOT NULL")
    }

    fn count_where(&self, condition: &str) -> Result<u64> {
        let n: i64 = self.conn()?.query_row(
            &format!("SELECT COUNT(*) FROM sys_logs WHERE {}", condition),
            [],
            |row| row.get(0),
        )?;
        Ok(n as u64)
    }

    /// Entries per event name, most frequent first
    pub fn event_counts(&self) -> Result<Vec<EventCount>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT event, COUNT(*) AS n FROM sys_logs GROUP BY event ORDER BY n DESC, event",
        )?;
        let counts = stmt
            .query_map([], |row| {
                Ok(EventCount {
                    event: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<duckdb::Result<Vec<_>>>()?;
        Ok(counts)
    }

    /// Remove entries older than `timestamp_ms`; returns how many went
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let deleted = self
            .conn()?
            .execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> LoggingService {
        LoggingService::new(dir.path(), EntryPoint::Cli, "0.1.0").unwrap()
    }

    #[test]
    fn test_creates_database_in_app_dir() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);
        assert_eq!(service.db_path(), dir.path().join("logs.duckdb"));
        assert!(service.db_path().exists());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = TempDir::new().unwrap();
        open(&dir).log_command("whoami").unwrap();

        let reopened = open(&dir);
        let entries = reopened.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "command_executed");
        assert_eq!(entries[0].command.as_deref(), Some("whoami"));
        assert_eq!(entries[0].entry_point, "cli");
        assert_eq!(entries[0].app_version, "0.1.0");
        assert_eq!(entries[0].platform, std::env::consts::OS);
    }

    /// One handle per process, borrowed by every command
    fn log_through(logger: &Option<LoggingService>, event: LogEvent) {
        if let Some(service) = logger {
            service.log(event).unwrap();
        }
    }

    #[test]
    fn test_every_event_of_a_run_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let logger = Some(open(&dir));
            logger.as_ref().unwrap().log_command("signin").unwrap();
            log_through(
                &logger,
                LogEvent::new("signin_succeeded")
                    .with_command("signin")
                    .with_session_token("tok-1"),
            );
            log_through(
                &logger,
                LogEvent::new("command_failed")
                    .with_command("signin")
                    .with_error("printing failed"),
            );
        }

        let reopened = open(&dir);
        let mut events: Vec<String> = reopened
            .get_recent(10)
            .unwrap()
            .into_iter()
            .map(|entry| entry.event)
            .collect();
        events.reverse();
        assert_eq!(events, ["command_executed", "signin_succeeded", "command_failed"]);
    }

    #[test]
    fn test_signin_event_keeps_only_fingerprint() {
        let dir = TempDir::new().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Embedded, "0.2.0").unwrap();
        let token = "eyJhbGciOiJIUzI1NiJ9.secret-payload";

        service
            .log(
                LogEvent::new("signin_succeeded")
                    .with_view("/search-products")
                    .with_command("signin")
                    .with_session_token(token),
            )
            .unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries[0].view.as_deref(), Some("/search-products"));
        assert_eq!(entries[0].entry_point, "embedded");
        assert_eq!(entries[0].session, Some(token_fingerprint(token)));

        let dumped = serde_json::to_string(&entries).unwrap();
        assert!(!dumped.contains("secret-payload"));
    }

    #[test]
    fn test_token_fingerprint_is_short_and_stable() {
        let a = token_fingerprint("tok-123");
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, token_fingerprint("tok-123"));
        assert_ne!(a, token_fingerprint("tok-124"));
    }

    #[test]
    fn test_failures_are_queryable() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);

        service.log_command("product search").unwrap();
        service
            .log(
                LogEvent::new("command_failed")
                    .with_command("product search")
                    .with_failure(&Error::Unauthorized("Token expired".into())),
            )
            .unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "command_failed");
        assert_eq!(errors[0].error_details.as_deref(), Some("unauthorized"));
        assert!(errors[0]
            .error_message
            .as_deref()
            .is_some_and(|m| m.contains("Token expired")));
        assert_eq!(service.count_errors().unwrap(), 1);
        assert_eq!(service.count().unwrap(), 2);
    }

    #[test]
    fn test_recent_is_newest_first_and_limited() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);
        for command in ["signin", "dashboard", "logout"] {
            service.log_command(command).unwrap();
        }

        let entries = service.get_recent(2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].command.as_deref(), Some("logout"));
        assert_eq!(entries[1].command.as_deref(), Some("dashboard"));
    }

    #[test]
    fn test_query_by_session_fingerprint() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);

        service
            .log(LogEvent::new("signin_succeeded").with_session_token("tok-a"))
            .unwrap();
        service
            .log(LogEvent::new("signin_succeeded").with_session_token("tok-b"))
            .unwrap();
        service
            .log(LogEvent::new("logout").with_session_token("tok-a"))
            .unwrap();

        let fingerprint = token_fingerprint("tok-a");
        let entries = service.query(LogFilter::Session(&fingerprint), 10).unwrap();
        let events: Vec<&str> = entries.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(events, vec!["logout", "signin_succeeded"]);
    }

    #[test]
    fn test_event_counts_most_frequent_first() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);

        service.log_command("product search").unwrap();
        service.log_command("whoami").unwrap();
        service.log(LogEvent::new("logout")).unwrap();

        let counts = service.event_counts().unwrap();
        assert_eq!(counts[0].event, "command_executed");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].event, "logout");
        assert_eq!(counts[1].count, 1);
    }

    #[test]
    fn test_delete_before_cutoff() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);
        service.log(LogEvent::new("session_discarded")).unwrap();
        service.log(LogEvent::new("signin_failed")).unwrap();

        assert_eq!(service.delete_before(now_ms() - 60_000).unwrap(), 0);
        assert_eq!(service.delete_before(now_ms() + 1_000).unwrap(), 2);
        assert_eq!(service.count().unwrap(), 0);
    }
}
