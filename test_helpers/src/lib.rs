//! Test helpers shared across crates.
//!
//! This crate provides an in-memory resource reader that records every read
//! and a thin wrapper around `figment::Jail` for filesystem scenarios.

pub mod figment;
pub mod memory;

pub use memory::MemoryReader;
