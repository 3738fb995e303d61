//! Log database migrations - embedded SQL files
//!
//! Each entry is (file name, sql), compiled in with include_str!. The
//! first file creates the bookkeeping table and must stay idempotent
//! because it runs on every open.

use std::collections::HashSet;

use duckdb::Connection;

pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    (
        "001_initial_schema.sql",
        include_str!("001_initial_schema.sql"),
    ),
];

/// Apply pending migrations in one transaction; returns the names applied
pub fn apply(conn: &mut Connection) -> duckdb::Result<Vec<&'static str>> {
    let tx = conn.transaction()?;

    if let Some((_, bookkeeping)) = LOG_MIGRATIONS.first() {
        tx.execute_batch(bookkeeping)?;
    }

    let mut applied = HashSet::new();
    {
        let mut stmt = tx.prepare("SELECT migration_name FROM sys_migrations")?;
        for name in stmt.query_map([], |row| row.get::<_, String>(0))? {
            applied.insert(name?);
        }
    }

    let mut newly_applied = Vec::new();
    for &(name, sql) in LOG_MIGRATIONS {
        if applied.contains(name) {
            continue;
        }
        tx.execute_batch(sql)?;
        tx.execute("INSERT INTO sys_migrations (migration_name) VALUES (?)", [name])?;
        newly_applied.push(name);
    }

    tx.commit()?;
    Ok(newly_applied)
}
