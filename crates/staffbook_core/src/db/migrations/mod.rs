//! Staff schema steps.
//!
//! The store records how far it has been migrated in `PRAGMA user_version`;
//! opening a store runs every step above that number in one transaction.
//! A store stamped with a version this build does not know is left alone.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "staff_tables",
    sql: include_str!("0001_staff.sql"),
}];

/// Highest schema version this build can produce.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings the store up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `Sqlite` when a step fails; no step is kept in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let stamped: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let target = latest_version();
    if stamped > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: stamped,
            latest_supported: target,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > stamped)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=ok step={} version={}",
            step.name, step.version
        );
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{latest_version, SCHEMA_STEPS};

    #[test]
    fn steps_are_strictly_increasing_from_one() {
        let versions: Vec<u32> = SCHEMA_STEPS.iter().map(|step| step.version).collect();
        let expected: Vec<u32> = (1..=versions.len() as u32).collect();
        assert_eq!(versions, expected);
        assert_eq!(latest_version(), versions.len() as u32);
    }
}
