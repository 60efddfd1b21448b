//! Roster domain model.
//!
//! # Responsibility
//! - Define students, teachers and sections as plain data records.
//! - Keep shared personal fields in one embedded `Person` struct.
//!
//! # Invariants
//! - Every record is identified by its file path only.
//! - Cross-record links are stored as paths, never as embedded records.

pub mod app_state;
pub mod grade;
pub mod person;
pub mod record;
pub mod section;
pub mod student;
pub mod teacher;
