//! Database operations for the sales API.
//!
//! # Database
//!
//! One MongoDB database with two collections:
//!
//! - `sales` - Sale documents with embedded review sub-documents
//! - `users` - Login users (email + argon2 password hash)
//!
//! The connection is established once at startup and handed to repositories
//! through [`crate::state::AppState`]. Consistency relies entirely on
//! MongoDB's per-document atomicity; there is no cross-document
//! coordination in this service.

pub mod filter;
pub mod sales;
pub mod users;

use mongodb::{Client, Database, IndexModel, bson::doc, options::IndexOptions};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::models::user::UserDocument;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying driver or connectivity failure.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A value could not be serialized to BSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),
}

/// Connect to MongoDB and select the configured database.
///
/// # Errors
///
/// Returns `mongodb::error::Error` if the connection string is invalid or
/// the server cannot be reached.
pub async fn connect(
    uri: &secrecy::SecretString,
    database_name: &str,
) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri.expose_secret()).await?;
    Ok(client.database(database_name))
}

/// Create the indexes the service relies on.
///
/// Currently a single unique index on `users.email`, which backs the
/// duplicate-registration check (surfaced to clients as 409 Conflict).
///
/// # Errors
///
/// Returns `mongodb::error::Error` if index creation fails.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let options = IndexOptions::builder().unique(true).build();
    let model = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(options)
        .build();

    db.collection::<UserDocument>(users::COLLECTION)
        .create_index(model)
        .await?;

    Ok(())
}

/// Whether a driver error is a duplicate-key write error (code 11000).
#[must_use]
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error))
            if write_error.code == 11000
    )
}
