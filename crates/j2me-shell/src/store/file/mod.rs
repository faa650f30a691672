//! File-based storage implementations.
//!
//! Each medium key is stored as its own file so a write only ever touches
//! one entry. All writes use atomic operations (temp file + rename) to
//! prevent corruption.

mod medium;

pub use medium::FileMedium;
