//! Exact discard-and-draw probabilities.
//!
//! After discarding `d` cards the player draws `d` replacements from the
//! remaining deck. Every one of the C(|deck|, d) possible draws is equally
//! likely, so walking all of them and counting which hand categories appear
//! gives exact probabilities. The discard cap keeps the walk bounded by
//! C(52, 5) = 2,598,960 evaluations.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

use crate::cards::{Card, Deck, DiscardSelection, Hand};
use crate::error::{MAX_DISCARD, ValidationError};
use crate::hands::{
    HandCategories, HandProfile, PokerHandType, detect_hand_categories, detect_profile_categories,
};

/// Probability of each [`PokerHandType`] being present in the final hand.
///
/// All thirteen categories are always present as keys. Categories overlap,
/// so the values do not sum to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HandProbabilities(BTreeMap<PokerHandType, f64>);

impl HandProbabilities {
    /// 1.0 for every category in `categories`, 0.0 for the rest.
    pub fn certain(categories: HandCategories) -> Self {
        Self(
            PokerHandType::ALL
                .into_iter()
                .map(|tag| (tag, if categories.contains(tag) { 1.0 } else { 0.0 }))
                .collect(),
        )
    }

    fn from_counts(counts: &[u64; 13], total: u64) -> Self {
        Self(
            PokerHandType::ALL
                .into_iter()
                .map(|tag| (tag, counts[tag as usize] as f64 / total as f64))
                .collect(),
        )
    }

    pub fn get(&self, tag: PokerHandType) -> f64 {
        self.0.get(&tag).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PokerHandType, f64)> + '_ {
        self.0.iter().map(|(&tag, &p)| (tag, p))
    }
}

/// Call `visit` with every `k`-element index combination of `0..n`, in
/// lexicographic order. Returns the number of combinations visited.
pub fn for_each_combination(n: usize, k: usize, mut visit: impl FnMut(&[usize])) -> u64 {
    if k > n {
        return 0;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    let mut visited = 0;
    loop {
        visit(&idx);
        visited += 1;

        // Rightmost position that can still move right.
        let mut i = k;
        loop {
            if i == 0 {
                return visited;
            }
            i -= 1;
            if idx[i] < n - k + i {
                break;
            }
        }
        idx[i] += 1;
        for j in i + 1..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

/// Probability of each hand category after keeping `kept` and drawing
/// `discard_count` cards from `deck`.
///
/// With nothing to draw, or when the deck cannot supply `discard_count`
/// cards, the kept cards are the final hand and every probability is 0 or 1.
pub fn compute_hand_probabilities(
    kept: &[Card],
    discard_count: usize,
    deck: &[Card],
) -> Result<HandProbabilities, ValidationError> {
    if discard_count > MAX_DISCARD {
        return Err(ValidationError::TooManyDiscards(discard_count));
    }
    if discard_count == 0 {
        return Ok(HandProbabilities::certain(detect_hand_categories(kept)));
    }
    if discard_count > deck.len() {
        tracing::warn!(
            discard_count,
            deck_size = deck.len(),
            "Deck too small to redraw, using kept cards only"
        );
        return Ok(HandProbabilities::certain(detect_hand_categories(kept)));
    }

    let started = Instant::now();
    let base = HandProfile::from_cards(kept);
    let mut counts = [0u64; 13];

    let total = for_each_combination(deck.len(), discard_count, |draw| {
        let mut profile = base;
        for &i in draw {
            profile.add(&deck[i]);
        }
        for tag in detect_profile_categories(&profile).iter() {
            counts[tag as usize] += 1;
        }
    });

    tracing::debug!(
        kept = kept.len(),
        discard_count,
        deck_size = deck.len(),
        combinations = total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Enumerated draws"
    );

    Ok(HandProbabilities::from_counts(&counts, total))
}

/// [`compute_hand_probabilities`] for discarding `selection` out of `hand`.
pub fn compute_discard_probabilities(
    hand: &Hand,
    selection: &DiscardSelection,
    deck: &Deck,
) -> Result<HandProbabilities, ValidationError> {
    compute_hand_probabilities(&hand.kept(selection), selection.len(), deck.cards())
}
