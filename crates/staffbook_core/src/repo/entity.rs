//! Generic entity contract.
//!
//! Each kind describes its table once (columns, row mapping, identity map
//! slot); every CRUD and query path in `Session` is written against this
//! trait only.

use super::identity_map::{IdentityMap, IdentityMaps};
use super::record::Record;
use super::session::Session;
use super::RepoResult;
use crate::model::{EntityKind, RecordId};
use rusqlite::types::Value;
use rusqlite::Row;

pub trait Entity: Sized + PartialEq {
    const KIND: EntityKind;

    /// Non-key columns in storage order. Rows are read as `id` followed by
    /// these columns, so `from_row` indexes them from 1.
    const COLUMNS: &'static [&'static str];

    /// Bind values matching `COLUMNS`.
    fn to_values(&self) -> Vec<Value>;

    /// Builds validated fields from a stored row.
    ///
    /// Rows that violate field rules are rejected, not masked.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    fn identity_map(maps: &mut IdentityMaps) -> &mut IdentityMap<Self>;

    fn find_by_id(session: &mut Session<'_>, id: RecordId) -> RepoResult<Option<Record<Self>>> {
        session.find_by_id(id)
    }

    fn get_all(session: &mut Session<'_>) -> RepoResult<Vec<Record<Self>>> {
        session.get_all()
    }
}

pub(crate) fn optional_id(value: Option<RecordId>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}
