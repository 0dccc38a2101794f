//! HTTP route handlers for the sales API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Liveness check
//! GET    /health/ready                        - Readiness check (pings the database)
//!
//! # Sales
//! GET    /sales                               - List sale summaries (bearer token required)
//! GET    /sale/{id}                           - One sale, minus line items
//! GET    /search                              - Filtered search (purchaseMethod, item, storeLocation)
//! POST   /new                                 - Create a sale
//! PUT    /{saleId}                            - Full-field replace of a sale
//! DELETE /sales/{saleId}                      - Delete a sale (and its reviews)
//!
//! # Reviews (embedded in a sale)
//! POST   /sales/{saleId}/reviews              - Add a review
//! PUT    /sales/{saleId}/reviews/{reviewId}   - Overwrite a review in place
//! DELETE /sales/{saleId}/reviews/{reviewId}   - Remove a review
//!
//! # Auth
//! POST   /users                               - Register (email + password)
//! POST   /login                               - Login, returns a bearer token
//! ```
//!
//! The path shapes are kept exactly as the frontend expects them, including
//! the bare `PUT /{saleId}` at the root.

pub mod auth;
pub mod reviews;
pub mod sales;
pub mod search;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create all routes for the sales API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Sales
        .route("/sales", get(sales::list))
        .route("/sale/{id}", get(sales::get))
        .route("/search", get(search::search))
        .route("/new", post(sales::create))
        .route("/{saleId}", put(sales::replace))
        .route("/sales/{saleId}", delete(sales::delete))
        // Reviews
        .route("/sales/{saleId}/reviews", post(reviews::add))
        .route(
            "/sales/{saleId}/reviews/{reviewId}",
            put(reviews::update).delete(reviews::delete),
        )
        // Auth
        .route("/users", post(auth::register))
        .route("/login", post(auth::login))
}
