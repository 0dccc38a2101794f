//! Supply Store Core - Shared types library.
//!
//! This crate provides the common types used across the sales API components.
//! It contains only types - no I/O, no database access, no HTTP clients -
//! which keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
