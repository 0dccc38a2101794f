//! Sale record route handlers: list, get, create, replace, delete.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use supply_store_core::SaleId;

use crate::db::sales::SaleRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireToken;
use crate::models::sale::{
    Customer, LineItem, NewSale, SaleDetailResponse, SaleReplacement, SaleSummary,
};
use crate::state::AppState;

/// Parse a sale id from a path segment.
///
/// A malformed identifier is a client mistake distinct from a missing
/// record: 400, not 404.
fn parse_sale_id(raw: &str) -> Result<SaleId> {
    SaleId::parse(raw).map_err(|_| AppError::Validation(format!("Invalid sale id: {raw}")))
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Missing required field: {field}"))
}

/// Sale creation payload. Every field is required; presence is checked
/// explicitly before any store call.
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub items: Option<Vec<LineItem>>,
    #[serde(rename = "storeLocation")]
    pub store_location: Option<String>,
    pub customer: Option<Customer>,
    #[serde(rename = "couponUsed")]
    pub coupon_used: Option<bool>,
    #[serde(rename = "purchaseMethod")]
    pub purchase_method: Option<String>,
}

impl CreateSaleRequest {
    fn validate(self) -> Result<NewSale> {
        Ok(NewSale {
            items: self.items.ok_or_else(|| missing("items"))?,
            store_location: self.store_location.ok_or_else(|| missing("storeLocation"))?,
            customer: self.customer.ok_or_else(|| missing("customer"))?,
            coupon_used: self.coupon_used.ok_or_else(|| missing("couponUsed"))?,
            purchase_method: self
                .purchase_method
                .ok_or_else(|| missing("purchaseMethod"))?,
        })
    }
}

/// Full-replace payload. Same fields as creation plus a caller-supplied
/// `saleDate`.
#[derive(Debug, Deserialize)]
pub struct ReplaceSaleRequest {
    #[serde(rename = "saleDate")]
    pub sale_date: Option<DateTime<Utc>>,
    pub items: Option<Vec<LineItem>>,
    #[serde(rename = "storeLocation")]
    pub store_location: Option<String>,
    pub customer: Option<Customer>,
    #[serde(rename = "couponUsed")]
    pub coupon_used: Option<bool>,
    #[serde(rename = "purchaseMethod")]
    pub purchase_method: Option<String>,
}

impl ReplaceSaleRequest {
    fn validate(self) -> Result<SaleReplacement> {
        Ok(SaleReplacement {
            sale_date: self.sale_date.ok_or_else(|| missing("saleDate"))?,
            items: self.items.ok_or_else(|| missing("items"))?,
            store_location: self.store_location.ok_or_else(|| missing("storeLocation"))?,
            customer: self.customer.ok_or_else(|| missing("customer"))?,
            coupon_used: self.coupon_used.ok_or_else(|| missing("couponUsed"))?,
            purchase_method: self
                .purchase_method
                .ok_or_else(|| missing("purchaseMethod"))?,
        })
    }
}

/// List up to ten sale summaries. Requires a valid bearer token.
#[instrument(skip(state, _claims))]
pub async fn list(
    State(state): State<AppState>,
    RequireToken(_claims): RequireToken,
) -> Result<Json<Vec<SaleSummary>>> {
    let sales = SaleRepository::new(state.db()).list_summaries().await?;
    Ok(Json(sales))
}

/// Get one sale by id, minus its line items.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SaleDetailResponse>> {
    let sale_id = parse_sale_id(&id)?;

    let detail = SaleRepository::new(state.db())
        .get_detail(sale_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale not found".to_string()))?;

    Ok(Json(SaleDetailResponse::from(detail)))
}

/// Create a new sale. The sale date is stamped server-side.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let new_sale = payload.validate()?;

    let id = SaleRepository::new(state.db()).create(&new_sale).await?;
    tracing::info!(sale_id = %id, "Sale inserted");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Sale inserted",
            "id": id.to_string(),
        })),
    ))
}

/// Full-field overwrite of a sale. Reviews are untouched.
#[instrument(skip(state, payload))]
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReplaceSaleRequest>,
) -> Result<Json<Value>> {
    let sale_id = parse_sale_id(&id)?;
    let replacement = payload.validate()?;

    let matched = SaleRepository::new(state.db())
        .replace(sale_id, &replacement)
        .await?;

    if !matched {
        return Err(AppError::NotFound("Sale not found".to_string()));
    }

    Ok(Json(json!({ "status": "Sale successfully updated" })))
}

/// Delete one sale; its embedded reviews go with it.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let sale_id = parse_sale_id(&id)?;

    let deleted = SaleRepository::new(state.db()).delete(sale_id).await?;

    if !deleted {
        return Err(AppError::NotFound("Sale not found".to_string()));
    }

    Ok(Json(json!({ "status": "Sale deleted" })))
}
