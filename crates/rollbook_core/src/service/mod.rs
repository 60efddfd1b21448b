//! Core use-case services.
//!
//! # Responsibility
//! - Own application-wide state through an explicit `AppContext`.
//! - Keep both sides of section/member links in sync for callers.
//! - Keep the presentation shell decoupled from file layout details.

pub mod context;
pub mod naming;
pub mod roster_service;
