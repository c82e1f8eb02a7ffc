//! Staff domain model: departments, employees and their reviews.
//!
//! # Responsibility
//! - Define the validated field sets of every entity kind.
//! - Keep validation rules independent from storage and identity tracking.
//!
//! # Invariants
//! - A model value never holds a blank text field or an out-of-range rating.
//! - Foreign keys are plain optional ids; their targets are not checked here.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod department;
pub mod employee;
pub mod review;
pub mod validation;

/// Primary key type shared by every table.
pub type RecordId = i64;

/// The fixed set of persisted record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Department,
    Employee,
    Review,
}

impl EntityKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Department => "departments",
            Self::Employee => "employees",
            Self::Review => "reviews",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::Employee => "Employee",
            Self::Review => "Review",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
