//! `proctor-catalog` — Course/Exam relational model over SQLite.
//!
//! Courses and exams are inserted administratively and queried by course
//! code. Reads go through a TTL-bounded in-process cache keyed by the
//! verbatim query string; inserting an exam invalidates the cached entries
//! for its course.

pub mod db;
pub mod error;
pub mod store;
pub mod types;

pub use error::{CatalogError, Result};
pub use store::CatalogStore;
pub use types::{Course, Exam};
