//! drift-core - a bounded-memory, windowed diff engine.
//!
//! Computes minimal edit scripts between two sequences of comparable
//! elements using Myers' shortest edit script algorithm. A sliding
//! window bounds how many unresolved elements are buffered per side,
//! which lets arbitrarily long line streams be diffed with fixed
//! memory. Results report whether the full edit script was computed or
//! truncated by the window (see [`DiffResult::is_restrained`]).

pub mod diff;
pub mod differ;
pub mod entry;
pub mod escape;
pub mod result;

pub use diff::{
    characters, files, files_with_window, lines, lines_with_window, DiffError, DEFAULT_LINE_WINDOW,
};
pub use differ::Differ;
pub use entry::{DiffEntry, EditKind};
pub use result::DiffResult;
