//! JSON request and response types shared by every transport.
//!
//! Counts arrive as signed integers so that a negative value is reported as a
//! [`ValidationError`] instead of a generic deserialization failure.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardFilter, Deck, count_matching};
use crate::enumeration::{HandProbabilities, compute_hand_probabilities};
use crate::error::{ValidationError, non_negative};
use crate::hands::{HandCategories, detect_hand_categories};
use crate::hypergeometric::compute_match_probability;
use crate::table::{TableRow, build_discard_table};

// ---------------------------------------------------------------------------
// Match probability
// ---------------------------------------------------------------------------

/// "Chance of drawing at least `min_matches` cards matching `filter`."
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub deck: Vec<Card>,
    pub draw_count: i64,
    pub min_matches: i64,
    #[serde(default)]
    pub filter: CardFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub probability: f64,
    /// Probability as a percentage with two decimals, e.g. `"34.12%"`.
    pub percentage: String,
}

impl CalculateResponse {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            percentage: format!("{:.2}%", probability * 100.0),
        }
    }
}

impl CalculateRequest {
    pub fn evaluate(&self) -> Result<CalculateResponse, ValidationError> {
        let draw = non_negative("drawCount", self.draw_count)?;
        let min_matches = non_negative("minMatches", self.min_matches)?;
        let matching = count_matching(&self.deck, &self.filter);
        let probability = compute_match_probability(self.deck.len(), matching, draw, min_matches)?;
        Ok(CalculateResponse::new(probability))
    }
}

// ---------------------------------------------------------------------------
// Hand detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectResponse {
    pub categories: HandCategories,
}

impl DetectRequest {
    pub fn evaluate(&self) -> DetectResponse {
        DetectResponse {
            categories: detect_hand_categories(&self.cards),
        }
    }
}

// ---------------------------------------------------------------------------
// Discard / draw odds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandOddsRequest {
    /// Cards held after the discard.
    pub kept: Vec<Card>,
    pub discard_count: i64,
    /// Cards that replacements are drawn from.
    pub deck: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandOddsResponse {
    pub probabilities: HandProbabilities,
}

impl HandOddsRequest {
    pub fn evaluate(&self) -> Result<HandOddsResponse, ValidationError> {
        let discard_count = non_negative("discardCount", self.discard_count)?;
        let probabilities = compute_hand_probabilities(&self.kept, discard_count, &self.deck)?;
        Ok(HandOddsResponse { probabilities })
    }
}

// ---------------------------------------------------------------------------
// Discard table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardTableRequest {
    pub deck: Deck,
    pub n_values: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscardTableResponse {
    pub rows: Vec<TableRow>,
}

impl DiscardTableRequest {
    pub fn evaluate(&self) -> Result<DiscardTableResponse, ValidationError> {
        let n_values = self
            .n_values
            .iter()
            .map(|&n| non_negative("nValues", n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DiscardTableResponse {
            rows: build_discard_table(self.deck.cards(), &n_values)?,
        })
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
