//! Exact card draw and discard probabilities for customizable decks.
//!
//! Four operations make up the engine:
//!
//! - [`compute_match_probability`]: hypergeometric "at least k matches".
//! - [`detect_hand_categories`]: every poker hand category present in a set
//!   of cards, including the secret hands.
//! - [`compute_hand_probabilities`]: exact category odds after a discard and
//!   redraw, by full enumeration.
//! - [`build_discard_table`]: per card type draw odds for a list of discard
//!   sizes.
//!
//! # Examples
//!
//! ```
//! use deckodds_core::{PokerHandType, compute_hand_probabilities};
//! use deckodds_core::cards::{Card, Deck};
//!
//! let kept: Vec<Card> = ["Ah", "Kh", "Qh", "Jh"]
//!     .iter()
//!     .map(|t| t.parse().unwrap())
//!     .collect();
//! let deck: Vec<Card> = Deck::standard()
//!     .cards()
//!     .iter()
//!     .filter(|c| !kept.iter().any(|k| k.rank == c.rank && k.suit == c.suit))
//!     .copied()
//!     .collect();
//!
//! let odds = compute_hand_probabilities(&kept, 1, &deck).unwrap();
//! assert_eq!(odds.get(PokerHandType::RoyalFlush), 1.0 / 48.0);
//! ```

pub mod cards;
pub mod enumeration;
pub mod error;
pub mod hands;
pub mod hypergeometric;
pub mod protocol;
pub mod table;

pub use enumeration::{HandProbabilities, compute_hand_probabilities};
pub use error::ValidationError;
pub use hands::{HandCategories, PokerHandType, detect_hand_categories};
pub use hypergeometric::compute_match_probability;
pub use table::{TableRow, build_discard_table};
