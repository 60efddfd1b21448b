//! Core data layer for Rollbook.
//! Records live one per file; this crate is the single source of truth for
//! how they are stored, loaded, linked and searched.

pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::app_state::{AppState, Settings};
pub use model::grade::{GradeLevel, SchoolYear};
pub use model::person::{Person, Sex};
pub use model::record::{AnyRecord, ParseFieldError, Record, RecordKind, ValidationError};
pub use model::section::Section;
pub use model::student::Student;
pub use model::teacher::{TaughtSection, Teacher};
pub use search::filter::{search, SearchFields, SearchFilters, Searchable};
pub use service::context::{AppContext, DataPaths, DEFAULT_DATA_ROOT};
pub use store::{Collection, RecordFile, StoreError, StoreResult, RECORD_EXTENSION};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
