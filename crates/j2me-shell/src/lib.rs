//! J2ME Shell - install, persist and run J2ME application archives.

pub mod build_info;
pub mod codec;
pub mod config;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod store;
pub mod theme;
