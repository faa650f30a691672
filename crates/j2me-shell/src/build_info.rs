//! Build metadata baked in at compile time.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
