//! Diesel models mirroring the SQLite schema.

pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod product;
pub mod settings;
