//! Review sub-document route handlers: add, update, delete.
//!
//! A review exists only inside its parent sale's `reviews` array; every
//! handler here resolves the parent first (by filter, atomically) and maps
//! the match outcome to exactly one response.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use supply_store_core::{ReviewId, SaleId};

use crate::db::sales::{DeleteReviewOutcome, ReviewInput, SaleRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Review payload for add and update. All fields required; `rating` accepts
/// a JSON number or a numeric string and is coerced before any store call.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub user: Option<String>,
    pub rating: Option<Value>,
    pub comment: Option<String>,
}

impl ReviewRequest {
    fn validate(self) -> Result<ReviewInput> {
        let user = self
            .user
            .ok_or_else(|| AppError::Validation("Missing required field: user".to_string()))?;
        let rating = self
            .rating
            .ok_or_else(|| AppError::Validation("Missing required field: rating".to_string()))?;
        let comment = self
            .comment
            .ok_or_else(|| AppError::Validation("Missing required field: comment".to_string()))?;

        Ok(ReviewInput {
            user,
            rating: coerce_rating(&rating)?,
            comment,
        })
    }
}

/// Coerce a rating value to a number.
///
/// Accepts a JSON number or a string parseable as one; anything else is a
/// validation error. Range is deliberately not checked - values are stored
/// as provided.
fn coerce_rating(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AppError::Validation("rating is not a representable number".to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::Validation(format!("rating is not numeric: {s}"))),
        _ => Err(AppError::Validation(
            "rating must be a number or numeric string".to_string(),
        )),
    }
}

fn parse_sale_id(raw: &str) -> Result<SaleId> {
    SaleId::parse(raw).map_err(|_| AppError::Validation(format!("Invalid sale id: {raw}")))
}

fn parse_review_id(raw: &str) -> Result<ReviewId> {
    ReviewId::parse(raw).map_err(|_| AppError::Validation(format!("Invalid review id: {raw}")))
}

/// Add a review to a sale. 404 if the parent sale does not exist.
#[instrument(skip(state, payload))]
pub async fn add(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
    Json(payload): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let sale_id = parse_sale_id(&sale_id)?;
    let input = payload.validate()?;

    let review_id = SaleRepository::new(state.db())
        .add_review(sale_id, input)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale not found".to_string()))?;

    tracing::info!(sale_id = %sale_id, review_id = %review_id, "Review added");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "Review added",
            "review_id": review_id,
        })),
    ))
}

/// Overwrite a review in place. The review id comes from the path and is
/// reasserted, never regenerated; the timestamp is reset to now.
///
/// 404 covers both a missing sale and a missing review: the store matches
/// on the compound condition and reports only whether it matched.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path((sale_id, review_id)): Path<(String, String)>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Value>> {
    let sale_id = parse_sale_id(&sale_id)?;
    let review_id = parse_review_id(&review_id)?;
    let input = payload.validate()?;

    let matched = SaleRepository::new(state.db())
        .update_review(sale_id, &review_id, input)
        .await?;

    if !matched {
        return Err(AppError::NotFound("Sale or review not found".to_string()));
    }

    Ok(Json(json!({
        "status": "Review updated",
        "review_id": review_id,
    })))
}

/// Remove a review from a sale. The two not-found outcomes are distinct:
/// the parent sale may be missing, or the sale may exist but contain no
/// review with the given id.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path((sale_id, review_id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let sale_id = parse_sale_id(&sale_id)?;
    let review_id = parse_review_id(&review_id)?;

    let outcome = SaleRepository::new(state.db())
        .delete_review(sale_id, &review_id)
        .await?;

    match outcome {
        DeleteReviewOutcome::SaleNotFound => {
            Err(AppError::NotFound("Sale not found".to_string()))
        }
        DeleteReviewOutcome::ReviewNotFound => {
            Err(AppError::NotFound("Review not found".to_string()))
        }
        DeleteReviewOutcome::Deleted => Ok(Json(json!({ "status": "Review deleted" }))),
    }
}
