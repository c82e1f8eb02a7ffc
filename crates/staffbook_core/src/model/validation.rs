//! Field validation rules shared by all entity kinds.
//!
//! Rules normalize on success (text is trimmed) and never mutate on failure;
//! callers assign the returned value only after the rule accepts it.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Rejected field assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Text field was empty or whitespace only.
    BlankText { field: &'static str },
    /// Rating outside `[MIN_RATING, MAX_RATING]` (NaN included).
    RatingOutOfRange(f64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText { field } => write!(f, "{field} must be a non-empty string"),
            Self::RatingOutOfRange(value) => write!(
                f,
                "rating must be a number between {MIN_RATING} and {MAX_RATING}, got {value}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankText { field });
    }
    Ok(trimmed.to_string())
}

pub(crate) fn rating_in_range(value: f64) -> Result<f64, ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::RatingOutOfRange(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{rating_in_range, required_text, ValidationError};

    #[test]
    fn required_text_trims_surrounding_whitespace() {
        assert_eq!(required_text("name", "  Ada \n").unwrap(), "Ada");
    }

    #[test]
    fn required_text_rejects_blank_input() {
        for blank in ["", " ", "\t", "\n  \r"] {
            assert_eq!(
                required_text("name", blank).unwrap_err(),
                ValidationError::BlankText { field: "name" }
            );
        }
    }

    #[test]
    fn rating_accepts_exactly_the_closed_range() {
        for accepted in [1.0, 1.5, 3.0, 4.99, 5.0] {
            assert_eq!(rating_in_range(accepted).unwrap(), accepted);
        }
        for rejected in [0.0, 0.999, 5.001, -3.0, 100.0, f64::INFINITY] {
            assert!(rating_in_range(rejected).is_err(), "{rejected} accepted");
        }
        assert!(rating_in_range(f64::NAN).is_err());
    }

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::BlankText { field: "location" };
        assert_eq!(err.to_string(), "location must be a non-empty string");
    }
}
