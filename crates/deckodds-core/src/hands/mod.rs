//! Poker hand category detection.
//!
//! Categories are presence flags rather than a single ranking: a hand of any
//! size reports every pattern it contains, so a straight flush is also a
//! straight and a flush. The game-specific secret hands live in [`secret`]
//! and are layered on top of the generic detector.

pub mod secret;

use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::cards::{Card, Rank, Suit};

/// A named card pattern a hand may exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PokerHandType {
    #[serde(rename = "High Card")]
    HighCard,
    #[serde(rename = "Pair")]
    Pair,
    #[serde(rename = "Two Pair")]
    TwoPair,
    #[serde(rename = "Three of a Kind")]
    ThreeOfAKind,
    #[serde(rename = "Straight")]
    Straight,
    #[serde(rename = "Flush")]
    Flush,
    #[serde(rename = "Full House")]
    FullHouse,
    #[serde(rename = "Four of a Kind")]
    FourOfAKind,
    #[serde(rename = "Straight Flush")]
    StraightFlush,
    #[serde(rename = "Royal Flush")]
    RoyalFlush,
    #[serde(rename = "Five of a Kind")]
    FiveOfAKind,
    #[serde(rename = "Flush Five")]
    FlushFive,
    #[serde(rename = "Flush House")]
    FlushHouse,
}

impl PokerHandType {
    pub const ALL: [PokerHandType; 13] = [
        PokerHandType::HighCard,
        PokerHandType::Pair,
        PokerHandType::TwoPair,
        PokerHandType::ThreeOfAKind,
        PokerHandType::Straight,
        PokerHandType::Flush,
        PokerHandType::FullHouse,
        PokerHandType::FourOfAKind,
        PokerHandType::StraightFlush,
        PokerHandType::RoyalFlush,
        PokerHandType::FiveOfAKind,
        PokerHandType::FlushFive,
        PokerHandType::FlushHouse,
    ];

    /// Hands that only exist in decks with duplicated cards.
    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            PokerHandType::FiveOfAKind | PokerHandType::FlushFive | PokerHandType::FlushHouse
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            PokerHandType::HighCard => "High Card",
            PokerHandType::Pair => "Pair",
            PokerHandType::TwoPair => "Two Pair",
            PokerHandType::ThreeOfAKind => "Three of a Kind",
            PokerHandType::Straight => "Straight",
            PokerHandType::Flush => "Flush",
            PokerHandType::FullHouse => "Full House",
            PokerHandType::FourOfAKind => "Four of a Kind",
            PokerHandType::StraightFlush => "Straight Flush",
            PokerHandType::RoyalFlush => "Royal Flush",
            PokerHandType::FiveOfAKind => "Five of a Kind",
            PokerHandType::FlushFive => "Flush Five",
            PokerHandType::FlushHouse => "Flush House",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for PokerHandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of [`PokerHandType`]s, stored as a bit set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HandCategories(u16);

impl HandCategories {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, tag: PokerHandType) {
        self.0 |= tag.bit();
    }

    fn set(&mut self, tag: PokerHandType, present: bool) {
        if present {
            self.insert(tag);
        }
    }

    pub fn contains(&self, tag: PokerHandType) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: HandCategories) -> HandCategories {
        HandCategories(self.0 | other.0)
    }

    /// Members in [`PokerHandType::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = PokerHandType> + '_ {
        PokerHandType::ALL
            .into_iter()
            .filter(move |&tag| self.contains(tag))
    }
}

impl FromIterator<PokerHandType> for HandCategories {
    fn from_iter<I: IntoIterator<Item = PokerHandType>>(iter: I) -> Self {
        let mut set = HandCategories::empty();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl Serialize for HandCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for tag in self.iter() {
            seq.serialize_element(&tag)?;
        }
        seq.end()
    }
}

/// Rank, suit and rank-by-suit counts of a set of cards.
///
/// Everything the detectors need, so a hand can be extended one card at a
/// time without rebuilding from scratch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandProfile {
    rank_counts: [u32; 13],
    suit_counts: [u32; 4],
    rank_suit_counts: [[u32; 4]; 13],
    total: usize,
}

impl HandProfile {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut profile = Self::default();
        for card in cards {
            profile.add(card);
        }
        profile
    }

    pub fn add(&mut self, card: &Card) {
        let (r, s) = (card.rank.index(), card.suit.index());
        self.rank_counts[r] += 1;
        self.suit_counts[s] += 1;
        self.rank_suit_counts[r][s] += 1;
        self.total += 1;
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn rank_count(&self, rank: Rank) -> u32 {
        self.rank_counts[rank.index()]
    }

    pub fn suit_count(&self, suit: Suit) -> u32 {
        self.suit_counts[suit.index()]
    }

    pub fn rank_suit_count(&self, rank: Rank, suit: Suit) -> u32 {
        self.rank_suit_counts[rank.index()][suit.index()]
    }

    /// Ranks present in the hand with their counts, sorted by count
    /// descending, then rank descending.
    pub fn rank_groups(&self) -> Vec<(Rank, u32)> {
        let mut groups: Vec<(Rank, u32)> = Rank::ALL
            .iter()
            .map(|&rank| (rank, self.rank_count(rank)))
            .filter(|&(_, count)| count > 0)
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        groups
    }

    /// Suits holding five or more cards.
    pub fn flush_suits(&self) -> impl Iterator<Item = Suit> + '_ {
        Suit::ALL
            .into_iter()
            .filter(|&suit| self.suit_count(suit) >= 5)
    }

    fn largest_rank_count(&self) -> u32 {
        self.rank_counts.iter().copied().max().unwrap_or(0)
    }

    fn ranks_with_at_least(&self, n: u32) -> usize {
        self.rank_counts.iter().filter(|&&c| c >= n).count()
    }

    fn rank_mask(&self) -> u16 {
        self.rank_counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }

    fn has_straight(&self) -> bool {
        is_straight_mask(self.rank_mask())
    }
}

/// Wheel: A-2-3-4-5 with the Ace playing low.
const WHEEL_MASK: u16 = (1 << 12) | 0b1111;

/// Five consecutive rank bits anywhere in the mask, or the wheel.
fn is_straight_mask(mask: u16) -> bool {
    (0..=8).any(|low| (mask >> low) & 0b1_1111 == 0b1_1111) || mask & WHEEL_MASK == WHEEL_MASK
}

const ROYAL_RANKS: [Rank; 5] = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];

/// Categories of the generic detector: everything except Flush Five and
/// Flush House.
pub fn detect_standard_categories(profile: &HandProfile) -> HandCategories {
    let mut found = HandCategories::empty();
    if profile.is_empty() {
        return found;
    }

    let largest = profile.largest_rank_count();
    let pairs = profile.ranks_with_at_least(2);
    let trips = profile.ranks_with_at_least(3);
    let straight = profile.has_straight();
    let flush = profile.flush_suits().next().is_some();
    let straight_flush = straight && flush;

    found.insert(PokerHandType::HighCard);
    found.set(PokerHandType::Pair, largest >= 2);
    found.set(PokerHandType::TwoPair, pairs >= 2);
    found.set(PokerHandType::ThreeOfAKind, largest >= 3);
    found.set(PokerHandType::Straight, straight);
    found.set(PokerHandType::Flush, flush);
    // A trips rank also counts among the pairs, so a second pair rank is needed.
    found.set(PokerHandType::FullHouse, trips >= 1 && pairs >= 2);
    found.set(PokerHandType::FourOfAKind, largest >= 4);
    found.set(PokerHandType::StraightFlush, straight_flush);
    found.set(
        PokerHandType::RoyalFlush,
        straight_flush
            && profile.flush_suits().any(|suit| {
                ROYAL_RANKS
                    .iter()
                    .all(|&rank| profile.rank_suit_count(rank, suit) > 0)
            }),
    );
    found.set(PokerHandType::FiveOfAKind, largest >= 5);
    found
}

/// Every category present in `profile`, secret hands included.
pub fn detect_profile_categories(profile: &HandProfile) -> HandCategories {
    let standard = detect_standard_categories(profile);
    standard.union(secret::detect_secret_categories(profile, standard))
}

/// Every category present in `cards`. Works on hands of any size; an empty
/// hand has no categories.
pub fn detect_hand_categories(cards: &[Card]) -> HandCategories {
    detect_profile_categories(&HandProfile::from_cards(cards))
}
