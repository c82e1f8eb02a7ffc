//! Per-kind identity maps.
//!
//! # Invariants
//! - At most one record handle per primary key per kind.
//! - Entries are added by save/materialize and removed by delete only; the
//!   maps are never consulted by validation and never used as a query index.

use super::record::Record;
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::review::Review;
use crate::model::{EntityKind, RecordId};
use std::collections::HashMap;

/// Primary key → live record for one entity kind.
pub struct IdentityMap<E> {
    entries: HashMap<RecordId, Record<E>>,
}

impl<E> Default for IdentityMap<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<E> IdentityMap<E> {
    /// Returns the cached handle for `id`, if any.
    pub fn get(&self, id: RecordId) -> Option<Record<E>> {
        self.entries.get(&id).cloned()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn register(&mut self, id: RecordId, record: Record<E>) {
        self.entries.insert(id, record);
    }

    /// Absent ids are tolerated.
    pub(crate) fn evict(&mut self, id: RecordId) -> Option<Record<E>> {
        self.entries.remove(&id)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The identity maps of all three kinds, owned by one session.
#[derive(Default)]
pub struct IdentityMaps {
    pub(crate) departments: IdentityMap<Department>,
    pub(crate) employees: IdentityMap<Employee>,
    pub(crate) reviews: IdentityMap<Review>,
}

impl IdentityMaps {
    pub fn departments(&self) -> &IdentityMap<Department> {
        &self.departments
    }

    pub fn employees(&self) -> &IdentityMap<Employee> {
        &self.employees
    }

    pub fn reviews(&self) -> &IdentityMap<Review> {
        &self.reviews
    }

    /// Number of cached records of `kind`.
    pub fn len_of(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Department => self.departments.len(),
            EntityKind::Employee => self.employees.len(),
            EntityKind::Review => self.reviews.len(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.departments.clear();
        self.employees.clear();
        self.reviews.clear();
    }
}
