//! `proctor-lookup` — static class-time → exam-window lookup table.
//!
//! The table is assembled once at startup from the built-in finals grid
//! plus any operator entries from proctor.toml, and is read-only after
//! that. Keys are matched after trimming and lowercasing only;
//! internal whitespace and punctuation must match the stored key exactly.

mod builtin;
pub mod table;

pub use table::ScheduleTable;
