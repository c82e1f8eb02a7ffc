//! Session: the store connection paired with its identity maps.
//!
//! # Responsibility
//! - Run every insert/update/delete/select for all entity kinds.
//! - Reconcile every row read from the store through the identity maps.
//!
//! # Invariants
//! - Identity maps start empty and live exactly as long as the session.
//! - Each mutating call issues one statement on an autocommit connection, so
//!   the change is committed when the call returns.
//! - Rows are fully parsed before any cached record is touched; a bad row
//!   leaves the cache unchanged.
//! - Reads never panic on a borrowed record: matching values are kept as-is,
//!   diverging ones fail with `RecordBorrowed`.

use super::entity::Entity;
use super::identity_map::IdentityMaps;
use super::record::Record;
use super::{RepoError, RepoResult};
use crate::model::{EntityKind, RecordId};
use log::{debug, error};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, ToSql};

/// Unit of identity for records loaded from one connection.
pub struct Session<'conn> {
    conn: &'conn Connection,
    identity: IdentityMaps,
}

impl<'conn> Session<'conn> {
    /// Starts a session with empty identity maps.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            identity: IdentityMaps::default(),
        }
    }

    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    pub fn identity(&self) -> &IdentityMaps {
        &self.identity
    }

    pub fn cached_count(&self, kind: EntityKind) -> usize {
        self.identity.len_of(kind)
    }

    /// Forgets every cached record. Handles already given out keep working
    /// but are no longer shared with later reads.
    pub fn clear_identity(&mut self) {
        self.identity.clear();
        debug!("event=identity_clear module=repo status=ok");
    }

    /// Inserts a transient record, assigns the generated id and registers it.
    ///
    /// # Errors
    /// - `AlreadyPersisted` when the record has an id.
    /// - `Db` when the insert fails; the record stays transient.
    pub fn save<E: Entity>(&mut self, record: &Record<E>) -> RepoResult<RecordId> {
        if let Some(id) = record.id() {
            return Err(RepoError::AlreadyPersisted { kind: E::KIND, id });
        }

        let values = record.fields().to_values();
        let placeholders = (1..=E::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            E::KIND.table(),
            E::COLUMNS.join(", ")
        );

        if let Err(err) = self.conn.execute(&sql, params_from_iter(values)) {
            error!(
                "event=record_save module=repo status=error kind={} error={}",
                E::KIND,
                err
            );
            return Err(err.into());
        }

        let id = self.conn.last_insert_rowid();
        record.assign_id(Some(id));
        E::identity_map(&mut self.identity).register(id, record.clone());
        debug!(
            "event=record_save module=repo status=ok kind={} id={id}",
            E::KIND
        );
        Ok(id)
    }

    /// Overwrites the stored row with the record's current fields.
    ///
    /// # Errors
    /// - `NotPersisted` when the record has no id.
    /// - `NotFound` when no row carries the record's id.
    pub fn update<E: Entity>(&mut self, record: &Record<E>) -> RepoResult<()> {
        let id = record
            .id()
            .ok_or(RepoError::NotPersisted { kind: E::KIND })?;

        let mut values = record.fields().to_values();
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{};",
            E::KIND.table(),
            values.len() + 1
        );
        values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(values))?;
        if changed == 0 {
            return Err(RepoError::NotFound { kind: E::KIND, id });
        }

        debug!(
            "event=record_update module=repo status=ok kind={} id={id}",
            E::KIND
        );
        Ok(())
    }

    /// Removes the stored row, evicts the record and clears its id.
    ///
    /// A different handle cached under the same id (after `clear_identity`)
    /// is evicted and detached too, since its row no longer exists.
    ///
    /// # Errors
    /// - `NotPersisted` when the record has no id.
    pub fn delete<E: Entity>(&mut self, record: &Record<E>) -> RepoResult<()> {
        let id = record
            .id()
            .ok_or(RepoError::NotPersisted { kind: E::KIND })?;

        let sql = format!("DELETE FROM {} WHERE id = ?1;", E::KIND.table());
        let removed = self.conn.execute(&sql, params![id])?;
        if let Some(cached) = E::identity_map(&mut self.identity).evict(id) {
            cached.assign_id(None);
        }
        record.assign_id(None);

        debug!(
            "event=record_delete module=repo status=ok kind={} id={id} rows={removed}",
            E::KIND
        );
        Ok(())
    }

    /// Re-reads the record's row and overwrites its fields in place.
    ///
    /// Returns `false` without touching the record when it has no id or its
    /// row no longer exists.
    ///
    /// # Errors
    /// - `RecordBorrowed` when the row changed while the record's fields are
    ///   borrowed.
    pub fn refresh<E: Entity>(&mut self, record: &Record<E>) -> RepoResult<bool> {
        let Some(id) = record.id() else {
            return Ok(false);
        };

        let fresh = self
            .fetch_rows::<E>(Some("id"), params![id])?
            .into_iter()
            .next();
        let found = match fresh {
            Some((_, fields)) => {
                if !record.replace_fields(fields) {
                    return Err(RepoError::RecordBorrowed { kind: E::KIND, id });
                }
                true
            }
            None => false,
        };

        debug!(
            "event=record_refresh module=repo status=ok kind={} id={id} found={found}",
            E::KIND
        );
        Ok(found)
    }

    /// Reconciles one parsed row with the identity map.
    ///
    /// A cached record has its fields overwritten with the row values and is
    /// returned; otherwise a new persisted record is registered.
    ///
    /// # Errors
    /// - `RecordBorrowed` when the cached record's fields are borrowed and
    ///   differ from the row.
    pub fn materialize<E: Entity>(
        &mut self,
        row: Option<(RecordId, E)>,
    ) -> RepoResult<Option<Record<E>>> {
        let Some((id, fields)) = row else {
            return Ok(None);
        };
        let map = E::identity_map(&mut self.identity);
        if let Some(cached) = map.get(id) {
            if !cached.replace_fields(fields) {
                return Err(RepoError::RecordBorrowed { kind: E::KIND, id });
            }
            return Ok(Some(cached));
        }

        let record = Record::persisted(id, fields);
        map.register(id, record.clone());
        Ok(Some(record))
    }

    pub fn find_by_id<E: Entity>(&mut self, id: RecordId) -> RepoResult<Option<Record<E>>> {
        self.find_first_by::<E>("id", &id)
    }

    /// Every row of the kind's table, in store iteration order.
    pub fn get_all<E: Entity>(&mut self) -> RepoResult<Vec<Record<E>>> {
        let rows = self.fetch_rows::<E>(None, params![])?;
        self.materialize_all(rows)
    }

    /// First row whose `column` equals `value`.
    pub(crate) fn find_first_by<E: Entity>(
        &mut self,
        column: &'static str,
        value: &dyn ToSql,
    ) -> RepoResult<Option<Record<E>>> {
        let row = self
            .fetch_rows::<E>(Some(column), &[value])?
            .into_iter()
            .next();
        self.materialize(row)
    }

    /// Every row whose `column` equals `value`, in store iteration order.
    pub(crate) fn find_all_by<E: Entity>(
        &mut self,
        column: &'static str,
        value: &dyn ToSql,
    ) -> RepoResult<Vec<Record<E>>> {
        let rows = self.fetch_rows::<E>(Some(column), &[value])?;
        self.materialize_all(rows)
    }

    fn materialize_all<E: Entity>(
        &mut self,
        rows: Vec<(RecordId, E)>,
    ) -> RepoResult<Vec<Record<E>>> {
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.extend(self.materialize(Some(row))?);
        }
        Ok(records)
    }

    fn fetch_rows<E: Entity>(
        &self,
        filter: Option<&'static str>,
        values: &[&dyn ToSql],
    ) -> RepoResult<Vec<(RecordId, E)>> {
        let mut sql = format!(
            "SELECT id, {} FROM {}",
            E::COLUMNS.join(", "),
            E::KIND.table()
        );
        if let Some(column) = filter {
            sql.push_str(&format!(" WHERE {column} = ?1"));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(values)?;
        let mut parsed = Vec::new();
        while let Some(row) = rows.next()? {
            parsed.push(parse_row::<E>(row)?);
        }
        Ok(parsed)
    }
}

fn parse_row<E: Entity>(row: &Row<'_>) -> RepoResult<(RecordId, E)> {
    let id: RecordId = row.get(0)?;
    let fields = E::from_row(row).map_err(|err| match err {
        RepoError::Validation(inner) => RepoError::InvalidData(format!(
            "{} row {id} violates field rules: {inner}",
            E::KIND.table()
        )),
        other => other,
    })?;
    Ok((id, fields))
}
