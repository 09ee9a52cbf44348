//! Infrastructure adapters for Kustos.
//!
//! This crate implements the ports defined in `kustos-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalRepoFs, MemoryRepoFs};
pub use renderer::FlattenRenderer;
