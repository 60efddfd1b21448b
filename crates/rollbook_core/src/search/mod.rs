//! In-memory search entry points.
//!
//! # Responsibility
//! - Filter loaded records by arbitrary field/value pairs.
//! - Keep the field projection used for matching inside core.

pub mod filter;
