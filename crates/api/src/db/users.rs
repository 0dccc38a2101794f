//! User repository for the `users` collection.

use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use supply_store_core::{Email, UserId};

use super::{RepositoryError, is_duplicate_key};
use crate::models::user::{User, UserDocument};

/// Name of the users collection.
pub const COLLECTION: &str = "users";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<UserDocument> {
        self.db.collection(COLLECTION)
    }

    /// Create a new user with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists
    /// (unique index on `email`).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let id = ObjectId::new();

        let document = UserDocument {
            id: Some(id),
            email: email.as_str().to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: bson::DateTime::now(),
        };

        self.collection().insert_one(&document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                RepositoryError::Conflict(format!("email already registered: {email}"))
            } else {
                RepositoryError::Database(e)
            }
        })?;

        Ok(User {
            id: UserId::from(id),
            email: email.clone(),
        })
    }

    /// Look up a user by email (exact match on the lowercased login key),
    /// returning the stored password hash alongside.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let document = self
            .collection()
            .find_one(doc! { "email": email.as_str() })
            .await?;

        Ok(document.and_then(|d| {
            d.id.map(|oid| {
                (
                    User {
                        id: UserId::from(oid),
                        email: email.clone(),
                    },
                    d.password_hash,
                )
            })
        }))
    }
}
