//! Route table and handlers.
//!
//! Handlers only translate between HTTP and the request types in
//! [`deckodds_core::protocol`]; all validation happens there. Failures are
//! reported as `{"error": "..."}` with the validation message unchanged.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use deckodds_core::ValidationError;
use deckodds_core::protocol::{
    CalculateRequest, CalculateResponse, DetectRequest, DetectResponse, DiscardTableRequest,
    DiscardTableResponse, ErrorResponse, HandOddsRequest, HandOddsResponse,
};
use tower_http::cors::CorsLayer;

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/detect", post(detect_handler))
        .route("/api/hand-odds", post(hand_odds_handler))
        .route("/api/discard-table", post(discard_table_handler))
        .layer(CorsLayer::permissive())
}

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// Request body was not valid JSON for the endpoint.
    BadRequest(String),
    Validation(ValidationError),
    /// Background computation panicked or was cancelled.
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse { error: message },
            ),
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, ErrorResponse::from(&err)),
            ApiError::Internal(message) => {
                tracing::error!(%message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse { error: message },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// `GET /api/health`
async fn health_handler() -> &'static str {
    "ok"
}

/// `POST /api/calculate` — hypergeometric match probability.
pub async fn calculate_handler(
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<CalculateResponse> {
    let Json(request) = payload?;
    let response = request.evaluate()?;
    tracing::debug!(
        deck_size = request.deck.len(),
        draw_count = request.draw_count,
        min_matches = request.min_matches,
        probability = response.probability,
        "Calculated match probability"
    );
    Ok(Json(response))
}

/// `POST /api/detect` — hand categories of the given cards.
pub async fn detect_handler(
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> ApiResult<DetectResponse> {
    let Json(request) = payload?;
    Ok(Json(request.evaluate()))
}

/// `POST /api/hand-odds` — exact category odds after a discard.
///
/// Enumeration can visit millions of draws, so it runs on the blocking pool.
pub async fn hand_odds_handler(
    payload: Result<Json<HandOddsRequest>, JsonRejection>,
) -> ApiResult<HandOddsResponse> {
    let Json(request) = payload?;
    let kept = request.kept.len();
    let discard_count = request.discard_count;

    let response = tokio::task::spawn_blocking(move || request.evaluate())
        .await
        .map_err(|e| ApiError::Internal(format!("Enumeration task failed: {e}")))??;

    tracing::info!(kept, discard_count, "Computed hand odds");
    Ok(Json(response))
}

/// `POST /api/discard-table` — the 69 row discard table.
pub async fn discard_table_handler(
    payload: Result<Json<DiscardTableRequest>, JsonRejection>,
) -> ApiResult<DiscardTableResponse> {
    let Json(request) = payload?;
    Ok(Json(request.evaluate()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use deckodds_core::cards::{Card, CardFilter, Deck, Rank, Suit};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_calculate_returns_probability_and_percentage() {
        let request = CalculateRequest {
            deck: Deck::standard().cards().to_vec(),
            draw_count: 5,
            min_matches: 1,
            filter: CardFilter::rank(Rank::Ace),
        };
        let Json(response) = calculate_handler(Ok(Json(request))).await.unwrap();
        assert!((response.probability - 0.3412).abs() < 1e-3);
        assert_eq!(response.percentage, "34.12%");
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_requests() {
        let request = CalculateRequest {
            deck: Deck::standard().cards().to_vec(),
            draw_count: 2,
            min_matches: 3,
            filter: CardFilter::default(),
        };
        let response = calculate_handler(Ok(Json(request)))
            .await
            .unwrap_err()
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Minimum matches (3) cannot exceed draw count (2)"
        );
    }

    #[tokio::test]
    async fn test_hand_odds_runs_enumeration() {
        let deck = Deck::standard();
        let kept: Vec<Card> = deck
            .cards()
            .iter()
            .filter(|c| c.suit == Suit::Hearts && c.rank >= Rank::Jack)
            .copied()
            .collect();
        let request = HandOddsRequest {
            deck: deck.without(&kept).cards().to_vec(),
            kept,
            discard_count: 1,
        };
        let Json(response) = hand_odds_handler(Ok(Json(request))).await.unwrap();
        assert_eq!(
            response
                .probabilities
                .get(deckodds_core::PokerHandType::RoyalFlush),
            1.0 / 48.0
        );
    }

    #[tokio::test]
    async fn test_hand_odds_rejects_six_discards() {
        let request = HandOddsRequest {
            kept: vec![],
            discard_count: 6,
            deck: Deck::standard().cards().to_vec(),
        };
        let response = hand_odds_handler(Ok(Json(request)))
            .await
            .unwrap_err()
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Cannot discard more than 5 cards (requested 6)"
        );
    }

    #[tokio::test]
    async fn test_empty_table_for_empty_deck() {
        let request = DiscardTableRequest {
            deck: Deck::default(),
            n_values: vec![1, 2, 3],
        };
        let Json(response) = discard_table_handler(Ok(Json(request))).await.unwrap();
        assert!(response.rows.is_empty());
    }

    #[tokio::test]
    async fn test_table_rejects_draws_larger_than_deck() {
        let deck = Deck::standard();
        let request = DiscardTableRequest {
            deck: Deck::new(deck.cards()[..3].to_vec()),
            n_values: vec![1, 10],
        };
        let response = discard_table_handler(Ok(Json(request)))
            .await
            .unwrap_err()
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            ValidationError::DrawExceedsDeck {
                draw: 10,
                deck_size: 3
            }
            .to_string()
        );
    }

    #[tokio::test]
    async fn test_internal_errors_are_server_errors() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "boom");
    }
}
