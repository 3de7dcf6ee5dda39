//! Hypergeometric draw probabilities.
//!
//! Answers "drawing `n` cards without replacement from a deck of `N` cards,
//! `K` of which match, what is the chance of at least `k` matches?".
//!
//! # Examples
//!
//! ```
//! use deckodds_core::hypergeometric::compute_match_probability;
//!
//! // At least one Ace in a five card draw from a standard deck.
//! let p = compute_match_probability(52, 4, 5, 1).unwrap();
//! assert!((p - 0.3412).abs() < 1e-3);
//! ```

use crate::cards::{CardFilter, Deck};
use crate::error::ValidationError;

/// Binomial coefficient C(n, k) as a float.
///
/// Accumulated one factor at a time so intermediate values never grow past
/// the result; deck sizes stay in the hundreds, well within `f64` range.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// P(X = i) for `draw_count` draws from `deck_size` cards with `matching`
/// successes.
pub fn pmf(i: usize, deck_size: usize, matching: usize, draw_count: usize) -> f64 {
    if matching > deck_size || draw_count > deck_size {
        return 0.0;
    }
    if i > matching || i > draw_count || draw_count - i > deck_size - matching {
        return 0.0;
    }
    let total = binomial(deck_size, draw_count);
    if total == 0.0 {
        return 0.0;
    }
    binomial(matching, i) * binomial(deck_size - matching, draw_count - i) / total
}

/// P(X <= k).
pub fn cdf(k: usize, deck_size: usize, matching: usize, draw_count: usize) -> f64 {
    (0..=k)
        .map(|i| pmf(i, deck_size, matching, draw_count))
        .sum()
}

/// Check the preconditions of [`compute_match_probability`].
pub fn validate_match_query(
    deck_size: usize,
    matching: usize,
    draw_count: usize,
    min_matches: usize,
) -> Result<(), ValidationError> {
    if matching > deck_size {
        return Err(ValidationError::MatchingExceedsDeck {
            matching,
            deck_size,
        });
    }
    if draw_count > deck_size {
        return Err(ValidationError::DrawExceedsDeck {
            draw: draw_count,
            deck_size,
        });
    }
    if min_matches > draw_count {
        return Err(ValidationError::MinMatchesExceedsDraw {
            min_matches,
            draw: draw_count,
        });
    }
    Ok(())
}

/// P(X >= `min_matches`) when drawing `draw_count` cards from a deck of
/// `deck_size` cards, `matching` of which satisfy the query.
pub fn compute_match_probability(
    deck_size: usize,
    matching: usize,
    draw_count: usize,
    min_matches: usize,
) -> Result<f64, ValidationError> {
    validate_match_query(deck_size, matching, draw_count, min_matches)?;
    Ok(match_probability(deck_size, matching, draw_count, min_matches))
}

/// Same as [`compute_match_probability`] for inputs already known to be valid.
pub(crate) fn match_probability(
    deck_size: usize,
    matching: usize,
    draw_count: usize,
    min_matches: usize,
) -> f64 {
    if min_matches == 0 {
        return 1.0;
    }
    if matching < min_matches {
        return 0.0;
    }
    // Too few non-matching cards to fill the draw without `min_matches` hits.
    if deck_size - matching < draw_count - min_matches + 1 {
        return 1.0;
    }

    let p = if min_matches == 1 {
        1.0 - pmf(0, deck_size, matching, draw_count)
    } else {
        1.0 - cdf(min_matches - 1, deck_size, matching, draw_count)
    };
    p.clamp(0.0, 1.0)
}

/// Count the cards of `deck` matching `filter`, then run
/// [`compute_match_probability`] against the whole deck.
pub fn match_probability_for(
    deck: &Deck,
    filter: &CardFilter,
    draw_count: usize,
    min_matches: usize,
) -> Result<f64, ValidationError> {
    compute_match_probability(
        deck.len(),
        deck.count_matching(filter),
        draw_count,
        min_matches,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, Rank, Suit};

    fn approx(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 0), 1.0);
        assert_eq!(binomial(5, 5), 1.0);
        assert_eq!(binomial(5, 2), 10.0);
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(52, 5), 2_598_960.0);
        assert_eq!(binomial(3, 4), 0.0);
        assert_eq!(binomial(0, 0), 1.0);
    }

    #[test]
    fn test_pmf() {
        // Exactly two spades in five cards.
        approx(pmf(2, 52, 13, 5), 0.2743, 1e-3);
        // No ace in a single draw: 48 / 52.
        approx(pmf(0, 52, 4, 1), 0.9231, 1e-3);
        // More successes than exist.
        assert_eq!(pmf(3, 52, 2, 5), 0.0);
    }

    #[test]
    fn test_cdf_sums_pmf() {
        let p0 = pmf(0, 52, 13, 5);
        let p1 = pmf(1, 52, 13, 5);
        approx(cdf(1, 52, 13, 5), p0 + p1, 1e-12);
        approx(cdf(5, 52, 13, 5), 1.0, 1e-12);
    }

    #[test]
    fn test_known_results() {
        approx(compute_match_probability(52, 4, 5, 1).unwrap(), 0.3412, 1e-3);
        approx(compute_match_probability(52, 13, 5, 2).unwrap(), 0.3670, 1e-3);
        // 1 - C(7,4)/C(10,4) = 5/6
        approx(compute_match_probability(10, 3, 4, 1).unwrap(), 5.0 / 6.0, 1e-9);
        // 1 - C(7,3)/C(10,3) = 85/120
        approx(compute_match_probability(10, 3, 3, 1).unwrap(), 85.0 / 120.0, 1e-9);
    }

    #[test]
    fn test_edge_cases() {
        // Not enough matching cards.
        assert_eq!(compute_match_probability(52, 3, 5, 4).unwrap(), 0.0);
        assert_eq!(compute_match_probability(52, 4, 5, 5).unwrap(), 0.0);
        assert_eq!(compute_match_probability(48, 0, 8, 1).unwrap(), 0.0);

        // Only two non-matching cards: five draws must hit.
        assert_eq!(compute_match_probability(52, 50, 5, 1).unwrap(), 1.0);

        // Plenty of non-matching cards, so not guaranteed.
        let p = compute_match_probability(52, 5, 5, 1).unwrap();
        assert!(p > 0.0 && p < 1.0);

        // Drawing the whole deck.
        assert_eq!(compute_match_probability(10, 3, 10, 3).unwrap(), 1.0);

        // Empty deck, empty draw.
        assert_eq!(compute_match_probability(0, 0, 0, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_min_matches_is_certain() {
        for deck_size in 0..=20 {
            for matching in 0..=deck_size {
                for draw in 0..=deck_size {
                    assert_eq!(
                        compute_match_probability(deck_size, matching, draw, 0).unwrap(),
                        1.0
                    );
                }
            }
        }
    }

    #[test]
    fn test_probability_bounds() {
        for deck_size in [1, 5, 13, 40, 52, 60] {
            for matching in 0..=deck_size {
                for draw in 0..=deck_size.min(10) {
                    for k in 0..=draw {
                        let p = compute_match_probability(deck_size, matching, draw, k).unwrap();
                        assert!((0.0..=1.0).contains(&p), "P({deck_size},{matching},{draw},{k}) = {p}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_monotone_in_min_matches() {
        let mut last = 1.0;
        for k in 0..=8 {
            let p = compute_match_probability(52, 13, 8, k).unwrap();
            assert!(p <= last + 1e-12);
            last = p;
        }
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            compute_match_probability(52, 53, 5, 1),
            Err(ValidationError::MatchingExceedsDeck {
                matching: 53,
                deck_size: 52
            })
        );
        assert_eq!(
            compute_match_probability(10, 3, 11, 1),
            Err(ValidationError::DrawExceedsDeck {
                draw: 11,
                deck_size: 10
            })
        );
        assert_eq!(
            compute_match_probability(52, 4, 2, 3),
            Err(ValidationError::MinMatchesExceedsDraw {
                min_matches: 3,
                draw: 2
            })
        );
    }

    #[test]
    fn test_modified_deck() {
        // 56 cards with 8 aces, at least two aces in five.
        let p = compute_match_probability(56, 8, 5, 2).unwrap();
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn test_match_probability_for_filters() {
        let deck = Deck::standard();
        approx(
            match_probability_for(&deck, &CardFilter::rank(Rank::Ace), 5, 1).unwrap(),
            0.3412,
            1e-3,
        );
        approx(
            match_probability_for(&deck, &CardFilter::suit(Suit::Hearts), 5, 2).unwrap(),
            0.3670,
            1e-3,
        );
        // Half the deck is red: drawing 27 cards guarantees one.
        assert_eq!(
            match_probability_for(&deck, &CardFilter::color(Color::Red), 27, 1).unwrap(),
            1.0
        );
    }
}
