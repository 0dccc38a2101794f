//! Domain models for the sales API.
//!
//! Storage shapes (what goes to and from BSON) live next to the response
//! shapes derived from them. Field names are serialized in the collection's
//! established camelCase convention.

pub mod sale;
pub mod user;
