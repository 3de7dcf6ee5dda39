//! Input validation errors.
//!
//! Every public operation validates its inputs up front and reports problems
//! through [`ValidationError`]. Once validation passes the computation itself
//! cannot fail.

use thiserror::Error;

/// Largest number of cards that may be discarded (and redrawn) at once.
pub const MAX_DISCARD: usize = 5;

/// Rejected input, raised before any computation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Number of matching cards ({matching}) cannot exceed deck size ({deck_size})")]
    MatchingExceedsDeck { matching: usize, deck_size: usize },

    #[error("Draw count ({draw}) cannot exceed deck size ({deck_size})")]
    DrawExceedsDeck { draw: usize, deck_size: usize },

    #[error("Minimum matches ({min_matches}) cannot exceed draw count ({draw})")]
    MinMatchesExceedsDraw { min_matches: usize, draw: usize },

    #[error("Cannot discard more than 5 cards (requested {0})")]
    TooManyDiscards(usize),

    /// A count arrived from the wire as a negative number.
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: i64 },

    #[error("Card {0} is not in the hand")]
    CardNotInHand(u32),

    #[error("Invalid card: {0}")]
    InvalidCard(String),
}

/// Convert a signed wire count into a core count.
pub fn non_negative(field: &'static str, value: i64) -> Result<usize, ValidationError> {
    usize::try_from(value).map_err(|_| ValidationError::Negative { field, value })
}
