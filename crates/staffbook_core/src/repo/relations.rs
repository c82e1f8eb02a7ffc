//! Foreign-key navigation between departments, employees and reviews.
//!
//! All traversal lives here so the entity kinds never depend on each other.
//! Results are materialized through the session like any other read.
//!
//! # Invariants
//! - A missing foreign key or a key with no matching row yields `None`.
//! - There are no relationship mutators; foreign keys change only through
//!   field setters followed by save/update.

use super::record::Record;
use super::session::Session;
use super::RepoResult;
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::review::Review;

impl Record<Department> {
    /// Employees whose `department_id` is this department's id.
    ///
    /// A transient department has no employees.
    pub fn employees(&self, session: &mut Session<'_>) -> RepoResult<Vec<Record<Employee>>> {
        match self.id() {
            Some(id) => session.find_all_by::<Employee>("department_id", &id),
            None => Ok(Vec::new()),
        }
    }
}

impl Record<Employee> {
    pub fn department(&self, session: &mut Session<'_>) -> RepoResult<Option<Record<Department>>> {
        let department_id = self.fields().department_id();
        match department_id {
            Some(id) => session.find_by_id::<Department>(id),
            None => Ok(None),
        }
    }

    pub fn reviews(&self, session: &mut Session<'_>) -> RepoResult<Vec<Record<Review>>> {
        match self.id() {
            Some(id) => Review::find_by_employee_id(session, id),
            None => Ok(Vec::new()),
        }
    }
}

impl Record<Review> {
    pub fn employee(&self, session: &mut Session<'_>) -> RepoResult<Option<Record<Employee>>> {
        let employee_id = self.fields().employee_id();
        match employee_id {
            Some(id) => session.find_by_id::<Employee>(id),
            None => Ok(None),
        }
    }
}
