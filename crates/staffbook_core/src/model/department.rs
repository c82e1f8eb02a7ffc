//! Department field set.
//!
//! # Invariants
//! - `name` and `location` are trimmed and never empty.

use super::validation::{required_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Validated department fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepartmentInput")]
pub struct Department {
    name: String,
    location: String,
}

#[derive(Deserialize)]
struct DepartmentInput {
    name: String,
    location: String,
}

impl Department {
    /// Validates every field; no value is produced when any rule fails.
    pub fn new(name: &str, location: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            location: required_text("location", location)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.name = required_text("name", value)?;
        Ok(())
    }

    pub fn set_location(&mut self, value: &str) -> Result<(), ValidationError> {
        self.location = required_text("location", value)?;
        Ok(())
    }
}

impl TryFrom<DepartmentInput> for Department {
    type Error = ValidationError;

    fn try_from(input: DepartmentInput) -> Result<Self, Self::Error> {
        Self::new(&input.name, &input.location)
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.location)
    }
}
