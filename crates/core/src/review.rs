//! Performance review input rules.

use crate::error::CoreError;

/// Lowest allowed star rating.
pub const MIN_RATING: i32 = 1;

/// Highest allowed star rating.
pub const MAX_RATING: i32 = 5;

/// Validate that a star rating is within bounds.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}
