//! Employee field set.
//!
//! # Invariants
//! - `name` and `position` are trimmed and never empty.
//! - `department_id` may point at a missing department.

use super::validation::{required_text, ValidationError};
use super::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Validated employee fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeInput")]
pub struct Employee {
    name: String,
    position: String,
    department_id: Option<RecordId>,
}

#[derive(Deserialize)]
struct EmployeeInput {
    name: String,
    position: String,
    #[serde(default)]
    department_id: Option<RecordId>,
}

impl Employee {
    pub fn new(
        name: &str,
        position: &str,
        department_id: Option<RecordId>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            position: required_text("position", position)?,
            department_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn department_id(&self) -> Option<RecordId> {
        self.department_id
    }

    pub fn set_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.name = required_text("name", value)?;
        Ok(())
    }

    pub fn set_position(&mut self, value: &str) -> Result<(), ValidationError> {
        self.position = required_text("position", value)?;
        Ok(())
    }

    pub fn set_department_id(&mut self, value: Option<RecordId>) {
        self.department_id = value;
    }
}

impl TryFrom<EmployeeInput> for Employee {
    type Error = ValidationError;

    fn try_from(input: EmployeeInput) -> Result<Self, Self::Error> {
        Self::new(&input.name, &input.position, input.department_id)
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, Dept ", self.name, self.position)?;
        match self.department_id {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("None"),
        }
    }
}
