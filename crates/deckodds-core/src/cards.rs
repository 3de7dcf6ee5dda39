//! Card and deck model.
//!
//! Cards carry an `id` so that a customized deck may hold several copies of
//! the same rank and suit while each physical card stays distinguishable.
//!
//! # Examples
//!
//! ```
//! use deckodds_core::cards::{Card, CardFilter, Deck, Rank, Suit};
//!
//! let deck = Deck::standard();
//! assert_eq!(deck.len(), 52);
//! assert_eq!(deck.count_matching(&CardFilter::rank(Rank::Ace)), 4);
//!
//! let card: Card = "10h".parse().unwrap();
//! assert_eq!((card.rank, card.suit), (Rank::Ten, Suit::Hearts));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MAX_DISCARD, ValidationError};

/// Represents a card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in table order
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Returns the suit as a display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    /// Position in [`Suit::ALL`], used for count arrays.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Card color, derived from the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

/// Represents a card rank (2-14, where 14 = Ace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "2")]
    Two = 2,
    #[serde(rename = "3")]
    Three = 3,
    #[serde(rename = "4")]
    Four = 4,
    #[serde(rename = "5")]
    Five = 5,
    #[serde(rename = "6")]
    Six = 6,
    #[serde(rename = "7")]
    Seven = 7,
    #[serde(rename = "8")]
    Eight = 8,
    #[serde(rename = "9")]
    Nine = 9,
    #[serde(rename = "10")]
    Ten = 10,
    #[serde(rename = "J")]
    Jack = 11,
    #[serde(rename = "Q")]
    Queen = 12,
    #[serde(rename = "K")]
    King = 13,
    #[serde(rename = "A")]
    Ace = 14,
}

impl Rank {
    /// All ranks, lowest first
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric value with the Ace high (2..=14).
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Position in [`Rank::ALL`], used for count arrays.
    pub fn index(&self) -> usize {
        (self.value() - 2) as usize
    }

    /// Returns the rank as a display string
    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Plural name, e.g. "Queens".
    pub fn plural(&self) -> &'static str {
        match self {
            Rank::Two => "Twos",
            Rank::Three => "Threes",
            Rank::Four => "Fours",
            Rank::Five => "Fives",
            Rank::Six => "Sixes",
            Rank::Seven => "Sevens",
            Rank::Eight => "Eights",
            Rank::Nine => "Nines",
            Rank::Ten => "Tens",
            Rank::Jack => "Jacks",
            Rank::Queen => "Queens",
            Rank::King => "Kings",
            Rank::Ace => "Aces",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Rank {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(ValidationError::InvalidCard(format!("unknown rank '{s}'"))),
        };
        Ok(rank)
    }
}

impl FromStr for Suit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suit = match s.to_ascii_lowercase().as_str() {
            "h" | "♥" | "hearts" => Suit::Hearts,
            "d" | "♦" | "diamonds" => Suit::Diamonds,
            "c" | "♣" | "clubs" => Suit::Clubs,
            "s" | "♠" | "spades" => Suit::Spades,
            _ => return Err(ValidationError::InvalidCard(format!("unknown suit '{s}'"))),
        };
        Ok(suit)
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "black" => Ok(Color::Black),
            _ => Err(ValidationError::InvalidCard(format!("unknown color '{s}'"))),
        }
    }
}

/// A single playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub id: u32,
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(id: u32, rank: Rank, suit: Suit) -> Self {
        Self { id, rank, suit }
    }

    pub fn color(&self) -> Color {
        self.suit.color()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Parses text such as `Ah`, `10h`, `Td` or `Q♠`. The parsed card has id 0.
impl FromStr for Card {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (split, _) = s
            .char_indices()
            .last()
            .ok_or_else(|| ValidationError::InvalidCard("empty card".to_string()))?;
        let (rank, suit) = s.split_at(split);
        if rank.is_empty() {
            return Err(ValidationError::InvalidCard(format!("missing rank in '{s}'")));
        }
        Ok(Card::new(0, rank.parse()?, suit.parse()?))
    }
}

/// Optional rank / suit / color predicates. An absent predicate matches every
/// card, so `CardFilter::default()` matches the whole deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl CardFilter {
    pub fn rank(rank: Rank) -> Self {
        Self {
            rank: Some(rank),
            ..Self::default()
        }
    }

    pub fn suit(suit: Suit) -> Self {
        Self {
            suit: Some(suit),
            ..Self::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Matches exactly one rank of one suit.
    pub fn specific(rank: Rank, suit: Suit) -> Self {
        Self {
            rank: Some(rank),
            suit: Some(suit),
            color: None,
        }
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.rank.is_none_or(|r| r == card.rank)
            && self.suit.is_none_or(|s| s == card.suit)
            && self.color.is_none_or(|c| c == card.color())
    }
}

/// An ordered collection of cards. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// The standard 52-card deck, ids 0..52 in suit-major order
    /// (Hearts 2..A, Diamonds 2..A, Clubs 2..A, Spades 2..A).
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| (rank, suit)))
            .enumerate()
            .map(|(id, (rank, suit))| Card::new(id as u32, rank, suit))
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards satisfying `filter`.
    pub fn count_matching(&self, filter: &CardFilter) -> usize {
        count_matching(&self.cards, filter)
    }

    /// A new deck with one occurrence of each of `removed` taken out.
    pub fn without(&self, removed: &[Card]) -> Deck {
        Deck::new(remove_each(&self.cards, removed))
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

/// Number of `cards` satisfying `filter`.
pub fn count_matching(cards: &[Card], filter: &CardFilter) -> usize {
    cards.iter().filter(|c| filter.matches(c)).count()
}

/// Cards currently held by the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Select held cards by id for discarding.
    pub fn select(&self, ids: &[u32]) -> Result<DiscardSelection, ValidationError> {
        let mut remaining = self.cards.clone();
        let mut picked = Vec::with_capacity(ids.len());
        for &id in ids {
            let pos = remaining
                .iter()
                .position(|c| c.id == id)
                .ok_or(ValidationError::CardNotInHand(id))?;
            picked.push(remaining.remove(pos));
        }
        DiscardSelection::new(picked)
    }

    /// The held cards that survive `selection`.
    pub fn kept(&self, selection: &DiscardSelection) -> Vec<Card> {
        remove_each(&self.cards, selection.cards())
    }
}

/// Up to [`MAX_DISCARD`] cards chosen from a hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiscardSelection {
    cards: Vec<Card>,
}

impl DiscardSelection {
    pub fn new(cards: Vec<Card>) -> Result<Self, ValidationError> {
        if cards.len() > MAX_DISCARD {
            return Err(ValidationError::TooManyDiscards(cards.len()));
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn remove_each(cards: &[Card], removed: &[Card]) -> Vec<Card> {
    let mut out = cards.to_vec();
    for r in removed {
        if let Some(pos) = out.iter().position(|c| c == r) {
            out.remove(pos);
        }
    }
    out
}
