//! Discard probability table.
//!
//! For each card type (a suit, a rank, or one specific card) and each
//! candidate discard size `N`, the chance that drawing `N` replacements
//! brings in at least one card of that type.

use serde::Serialize;

use crate::cards::{Card, CardFilter, Rank, Suit, count_matching};
use crate::error::ValidationError;
use crate::hypergeometric::{match_probability, validate_match_query};

/// Which kind of card type a [`TableRow`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowCategory {
    Suit,
    Rank,
    Specific,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub label: String,
    pub category: RowCategory,
    pub matching_cards: usize,
    /// One entry per requested `N`, in request order.
    pub probabilities: Vec<f64>,
}

/// The fixed row layout: 4 suits, 13 ranks, then 52 specific cards grouped
/// by suit.
pub fn table_queries() -> Vec<(String, RowCategory, CardFilter)> {
    let suits = Suit::ALL
        .iter()
        .map(|&suit| (suit.name().to_string(), RowCategory::Suit, CardFilter::suit(suit)));
    let ranks = Rank::ALL
        .iter()
        .map(|&rank| (rank.plural().to_string(), RowCategory::Rank, CardFilter::rank(rank)));
    let specific = Suit::ALL.iter().flat_map(|&suit| {
        Rank::ALL.iter().map(move |&rank| {
            (
                format!("{rank}{suit}"),
                RowCategory::Specific,
                CardFilter::specific(rank, suit),
            )
        })
    });
    suits.chain(ranks).chain(specific).collect()
}

/// Build the table for `remaining_deck`, one probability per entry of
/// `n_values`.
///
/// Every `N` must be a valid draw of at least one card from the deck: `N = 0`
/// and `N > |remaining_deck|` are rejected before any row is computed.
pub fn build_discard_table(
    remaining_deck: &[Card],
    n_values: &[usize],
) -> Result<Vec<TableRow>, ValidationError> {
    if remaining_deck.is_empty() || n_values.is_empty() {
        return Ok(Vec::new());
    }
    let deck_size = remaining_deck.len();
    for &n in n_values {
        validate_match_query(deck_size, 0, n, 1)?;
    }

    let rows = table_queries()
        .into_iter()
        .map(|(label, category, filter)| {
            let matching = count_matching(remaining_deck, &filter);
            let probabilities = n_values
                .iter()
                .map(|&n| match_probability(deck_size, matching, n, 1))
                .collect();
            TableRow {
                label,
                category,
                matching_cards: matching,
                probabilities,
            }
        })
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::hypergeometric::compute_match_probability;

    #[test]
    fn test_empty_inputs_give_empty_table() {
        assert!(build_discard_table(&[], &[1, 2, 3]).unwrap().is_empty());
        assert!(build_discard_table(&[], &[0, 99]).unwrap().is_empty());
        assert!(build_discard_table(Deck::standard().cards(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_row_layout_is_fixed() {
        let table = build_discard_table(Deck::standard().cards(), &[1, 3, 5]).unwrap();
        assert_eq!(table.len(), 69);
        assert!(table.iter().all(|row| row.probabilities.len() == 3));

        assert_eq!(table[0].label, "Hearts");
        assert_eq!(table[3].label, "Spades");
        assert!(table[..4].iter().all(|r| r.category == RowCategory::Suit));

        assert_eq!(table[4].label, "Twos");
        assert_eq!(table[16].label, "Aces");
        assert!(table[4..17].iter().all(|r| r.category == RowCategory::Rank));

        assert_eq!(table[17].label, "2♥");
        assert_eq!(table[29].label, "A♥");
        assert_eq!(table[30].label, "2♦");
        assert_eq!(table[68].label, "A♠");
        assert!(table[17..].iter().all(|r| r.category == RowCategory::Specific));
    }

    #[test]
    fn test_probabilities_follow_the_calculator() {
        let deck = Deck::standard();
        let table = build_discard_table(deck.cards(), &[1, 5]).unwrap();

        let aces = &table[16];
        assert_eq!(aces.matching_cards, 4);
        assert_eq!(
            aces.probabilities,
            vec![
                compute_match_probability(52, 4, 1, 1).unwrap(),
                compute_match_probability(52, 4, 5, 1).unwrap(),
            ]
        );
        assert!((aces.probabilities[1] - 0.3412).abs() < 1e-3);

        let hearts = &table[0];
        assert_eq!(hearts.matching_cards, 13);
        assert_eq!(hearts.probabilities[0], 0.25);
    }

    #[test]
    fn test_missing_cards_have_zero_probability() {
        let deck = Deck::standard();
        let no_spades: Vec<_> = deck
            .cards()
            .iter()
            .filter(|c| c.suit != Suit::Spades)
            .copied()
            .collect();
        let table = build_discard_table(&no_spades, &[5]).unwrap();
        assert_eq!(table[3].matching_cards, 0);
        assert_eq!(table[3].probabilities, vec![0.0]);
        assert_eq!(table[68].probabilities, vec![0.0]);
    }

    #[test]
    fn test_whole_deck_draw() {
        let deck = Deck::new(vec![
            Card::new(0, Rank::Ace, Suit::Hearts),
            Card::new(1, Rank::Two, Suit::Clubs),
        ]);
        let table = build_discard_table(deck.cards(), &[1, 2]).unwrap();
        let ace_of_hearts = table.iter().find(|r| r.label == "A♥").unwrap();
        assert_eq!(ace_of_hearts.probabilities, vec![0.5, 1.0]);
    }

    #[test]
    fn test_rejects_draws_outside_the_deck() {
        let deck = Deck::new(vec![
            Card::new(0, Rank::Ace, Suit::Hearts),
            Card::new(1, Rank::Ace, Suit::Diamonds),
            Card::new(2, Rank::Ace, Suit::Clubs),
        ]);
        assert_eq!(
            build_discard_table(deck.cards(), &[1, 10]),
            Err(ValidationError::DrawExceedsDeck {
                draw: 10,
                deck_size: 3
            })
        );
        assert_eq!(
            build_discard_table(deck.cards(), &[0]),
            Err(ValidationError::MinMatchesExceedsDraw {
                min_matches: 1,
                draw: 0
            })
        );
        assert_eq!(
            compute_match_probability(3, 3, 10, 1),
            Err(ValidationError::DrawExceedsDeck {
                draw: 10,
                deck_size: 3
            })
        );
    }
}
