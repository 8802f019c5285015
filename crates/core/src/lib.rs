//! Shared domain types for the authvid service.
//!
//! Kept free of database and HTTP concerns so both `authvid-db` and
//! `authvid-api` can depend on it.

pub mod error;
pub mod phone;
pub mod types;
