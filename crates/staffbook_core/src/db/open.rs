//! Connection bootstrap for the staff store.
//!
//! # Responsibility
//! - Open file-backed or in-memory SQLite connections.
//! - Configure pragmas the record layer relies on.
//! - Apply pending migrations before handing the connection out.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=OFF`; dangling
//!   `department_id`/`employee_id` values are valid stored state.
//! - Returned connections run in autocommit mode, so every statement issued by
//!   the record layer is committed when it returns.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// SQLite database file, created when missing.
    File(PathBuf),
    /// Private in-memory database dropped with the connection.
    Memory,
}

impl StoreTarget {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Opens the store described by `target` and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` events with duration and status.
pub fn open_store(target: &StoreTarget) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = target.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let opened = match target {
        StoreTarget::File(path) => Connection::open(path),
        StoreTarget::Memory => Connection::open_in_memory(),
    };
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    if let Err(err) = bootstrap_connection(&mut conn) {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

/// Opens (or creates) a file-backed store.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_store(&StoreTarget::File(path.as_ref().to_path_buf()))
}

/// Opens a fresh in-memory store.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_store(&StoreTarget::Memory)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
