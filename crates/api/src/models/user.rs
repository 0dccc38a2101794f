//! Login users.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use supply_store_core::{Email, UserId};

/// User document as stored in the `users` collection.
///
/// Only the argon2 PHC hash of the password is ever stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password_hash: String,
    pub created_at: bson::DateTime,
}

/// A user as seen by the rest of the service (no hash).
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
}
