//! Secret hands that only appear once the deck holds duplicated cards.
//!
//! Five of a Kind is detected by the generic rank counting in the parent
//! module; the two flush variants below need rank-by-suit information and
//! are kept apart so the generic detector stays free of this ruleset.

use super::{HandCategories, HandProfile, PokerHandType};
use crate::cards::{Rank, Suit};

/// Five or more cards of one rank sharing one suit.
pub fn is_flush_five(profile: &HandProfile) -> bool {
    Rank::ALL.iter().any(|&rank| {
        profile.rank_count(rank) >= 5
            && Suit::ALL
                .iter()
                .any(|&suit| profile.rank_suit_count(rank, suit) >= 5)
    })
}

/// A full house whose three-of-a-kind rank and pair rank together hold five
/// or more cards of one suit.
///
/// Every (three-of-a-kind rank, pair rank) choice is tried, not only the
/// largest groups.
pub fn is_flush_house(profile: &HandProfile) -> bool {
    let groups = profile.rank_groups();
    groups.iter().filter(|&&(_, count)| count >= 3).any(|&(trips, _)| {
        groups
            .iter()
            .filter(|&&(rank, count)| rank != trips && count >= 2)
            .any(|&(pair, _)| {
                Suit::ALL.iter().any(|&suit| {
                    profile.rank_suit_count(trips, suit) + profile.rank_suit_count(pair, suit) >= 5
                })
            })
    })
}

/// Secret categories of `profile`, given the generic categories already
/// found for it.
pub fn detect_secret_categories(
    profile: &HandProfile,
    standard: HandCategories,
) -> HandCategories {
    let mut found = HandCategories::empty();
    if standard.contains(PokerHandType::FiveOfAKind) && is_flush_five(profile) {
        found.insert(PokerHandType::FlushFive);
    }
    if standard.contains(PokerHandType::FullHouse) && is_flush_house(profile) {
        found.insert(PokerHandType::FlushHouse);
    }
    found
}
