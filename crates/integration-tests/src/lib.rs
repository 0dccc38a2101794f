//! Integration tests for the supply store sales API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start MongoDB and the API
//! docker compose up -d mongo
//! cargo run -p supply-store-api
//!
//! # Run integration tests
//! cargo test -p supply-store-integration-tests -- --ignored
//! ```
//!
//! All tests are `#[ignore]`d by default because they require a running
//! server and database. The base URL is configurable via `API_BASE_URL`
//! (default `http://localhost:3000`).
