//! `departments` table mapping and department queries.

use super::entity::Entity;
use super::identity_map::{IdentityMap, IdentityMaps};
use super::record::Record;
use super::session::Session;
use super::RepoResult;
use crate::model::department::Department;
use crate::model::EntityKind;
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for Department {
    const KIND: EntityKind = EntityKind::Department;
    const COLUMNS: &'static [&'static str] = &["name", "location"];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name().to_string()),
            Value::Text(self.location().to_string()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let name: String = row.get(1)?;
        let location: String = row.get(2)?;
        Ok(Self::new(&name, &location)?)
    }

    fn identity_map(maps: &mut IdentityMaps) -> &mut IdentityMap<Self> {
        &mut maps.departments
    }
}

impl Department {
    /// Validates and inserts a new department.
    pub fn create(
        session: &mut Session<'_>,
        name: &str,
        location: &str,
    ) -> RepoResult<Record<Self>> {
        let record = Record::new(Self::new(name, location)?);
        session.save(&record)?;
        Ok(record)
    }

    /// First department whose stored name equals `name` exactly.
    pub fn find_by_name(session: &mut Session<'_>, name: &str) -> RepoResult<Option<Record<Self>>> {
        session.find_first_by::<Self>("name", &name)
    }
}
