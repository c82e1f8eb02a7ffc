//! Review field set.
//!
//! # Invariants
//! - `content` is trimmed and never empty.
//! - `rating` stays within `[MIN_RATING, MAX_RATING]`.

use super::validation::{rating_in_range, required_text, ValidationError};
use super::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Validated review fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReviewInput")]
pub struct Review {
    content: String,
    rating: f64,
    employee_id: Option<RecordId>,
}

#[derive(Deserialize)]
struct ReviewInput {
    content: String,
    rating: f64,
    #[serde(default)]
    employee_id: Option<RecordId>,
}

impl Review {
    pub fn new(
        content: &str,
        rating: f64,
        employee_id: Option<RecordId>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            content: required_text("content", content)?,
            rating: rating_in_range(rating)?,
            employee_id,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn employee_id(&self) -> Option<RecordId> {
        self.employee_id
    }

    pub fn set_content(&mut self, value: &str) -> Result<(), ValidationError> {
        self.content = required_text("content", value)?;
        Ok(())
    }

    pub fn set_rating(&mut self, value: f64) -> Result<(), ValidationError> {
        self.rating = rating_in_range(value)?;
        Ok(())
    }

    pub fn set_employee_id(&mut self, value: Option<RecordId>) {
        self.employee_id = value;
    }
}

impl TryFrom<ReviewInput> for Review {
    type Error = ValidationError;

    fn try_from(input: ReviewInput) -> Result<Self, Self::Error> {
        Self::new(&input.content, input.rating, input.employee_id)
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rating {} for Employee ", self.rating)?;
        match self.employee_id {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("None"),
        }
    }
}
