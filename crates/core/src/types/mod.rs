//! Core types for the supply store sales API.

pub mod email;
pub mod id;

pub use email::{Email, EmailError};
pub use id::{IdError, ReviewId, SaleId, UserId};
