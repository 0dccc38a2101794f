//! Sale search route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::db::filter::SaleFilter;
use crate::db::sales::SaleRepository;
use crate::error::Result;
use crate::models::sale::SearchHit;
use crate::state::AppState;

/// Search sales by optional case-insensitive substring filters.
///
/// Absent parameters impose no constraint; with none present this returns
/// the first ten sales.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(filter): Query<SaleFilter>,
) -> Result<Json<Vec<SearchHit>>> {
    let hits = SaleRepository::new(state.db()).search(filter).await?;
    Ok(Json(hits))
}
