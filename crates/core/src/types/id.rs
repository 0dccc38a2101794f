//! Newtype IDs for type-safe entity references.
//!
//! Sales and users are identified by store-assigned BSON `ObjectId`s; reviews
//! are identified by a UUID v4 generated at creation time and stored as a
//! plain string inside the parent sale. Wrapping all three in newtypes
//! prevents accidentally passing a review id where a sale id is expected.

use core::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing an identifier from a request path.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdError {
    /// The value is not a valid 24-character hex `ObjectId`.
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),
    /// The value is not a valid UUID.
    #[error("invalid review id: {0}")]
    InvalidReviewId(String),
}

/// Identifier of a sale document.
///
/// Assigned by the document store on insert, immutable afterwards and never
/// reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(ObjectId);

impl SaleId {
    /// Parse a sale id from its 24-character hex representation.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidObjectId`] if the input is not a valid
    /// `ObjectId` hex string.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| IdError::InvalidObjectId(s.to_owned()))
    }

    /// The underlying `ObjectId`, for building store filters.
    #[must_use]
    pub const fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for SaleId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl FromStr for SaleId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifier of a user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(ObjectId);

impl UserId {
    /// Parse a user id from its 24-character hex representation.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidObjectId`] if the input is not a valid
    /// `ObjectId` hex string.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| IdError::InvalidObjectId(s.to_owned()))
    }

    /// The underlying `ObjectId`.
    #[must_use]
    pub const fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for UserId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// Identifier of a review inside a sale's embedded review list.
///
/// Generated fresh on creation (UUID v4) and unique within the owning sale.
/// Stored as a hyphenated string so that the JSON and BSON representations
/// are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(String);

impl ReviewId {
    /// Generate a fresh review id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse a review id from a request path.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidReviewId`] if the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let uuid = Uuid::parse_str(s).map_err(|_| IdError::InvalidReviewId(s.to_owned()))?;
        Ok(Self(uuid.to_string()))
    }

    /// The review id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
