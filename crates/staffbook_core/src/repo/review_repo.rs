//! `reviews` table mapping and review queries.

use super::entity::{optional_id, Entity};
use super::identity_map::{IdentityMap, IdentityMaps};
use super::record::Record;
use super::session::Session;
use super::RepoResult;
use crate::model::review::Review;
use crate::model::{EntityKind, RecordId};
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for Review {
    const KIND: EntityKind = EntityKind::Review;
    const COLUMNS: &'static [&'static str] = &["content", "rating", "employee_id"];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.content().to_string()),
            Value::Real(self.rating()),
            optional_id(self.employee_id()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let content: String = row.get(1)?;
        let rating: f64 = row.get(2)?;
        let employee_id: Option<RecordId> = row.get(3)?;
        Ok(Self::new(&content, rating, employee_id)?)
    }

    fn identity_map(maps: &mut IdentityMaps) -> &mut IdentityMap<Self> {
        &mut maps.reviews
    }
}

impl Review {
    /// Validates and inserts a new review.
    pub fn create(
        session: &mut Session<'_>,
        content: &str,
        rating: f64,
        employee_id: Option<RecordId>,
    ) -> RepoResult<Record<Self>> {
        let record = Record::new(Self::new(content, rating, employee_id)?);
        session.save(&record)?;
        Ok(record)
    }

    /// Reviews written for `employee_id`, in store iteration order.
    pub fn find_by_employee_id(
        session: &mut Session<'_>,
        employee_id: RecordId,
    ) -> RepoResult<Vec<Record<Self>>> {
        session.find_all_by::<Self>("employee_id", &employee_id)
    }
}
