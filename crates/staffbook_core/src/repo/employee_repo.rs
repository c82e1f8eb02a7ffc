//! `employees` table mapping and employee queries.

use super::entity::{optional_id, Entity};
use super::identity_map::{IdentityMap, IdentityMaps};
use super::record::Record;
use super::session::Session;
use super::RepoResult;
use crate::model::employee::Employee;
use crate::model::{EntityKind, RecordId};
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for Employee {
    const KIND: EntityKind = EntityKind::Employee;
    const COLUMNS: &'static [&'static str] = &["name", "position", "department_id"];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name().to_string()),
            Value::Text(self.position().to_string()),
            optional_id(self.department_id()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let name: String = row.get(1)?;
        let position: String = row.get(2)?;
        let department_id: Option<RecordId> = row.get(3)?;
        Ok(Self::new(&name, &position, department_id)?)
    }

    fn identity_map(maps: &mut IdentityMaps) -> &mut IdentityMap<Self> {
        &mut maps.employees
    }
}

impl Employee {
    /// Validates and inserts a new employee.
    pub fn create(
        session: &mut Session<'_>,
        name: &str,
        position: &str,
        department_id: Option<RecordId>,
    ) -> RepoResult<Record<Self>> {
        let record = Record::new(Self::new(name, position, department_id)?);
        session.save(&record)?;
        Ok(record)
    }

    pub fn find_by_name(session: &mut Session<'_>, name: &str) -> RepoResult<Option<Record<Self>>> {
        session.find_first_by::<Self>("name", &name)
    }
}
