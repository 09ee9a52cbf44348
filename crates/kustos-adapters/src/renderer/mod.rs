//! Manifest renderer adapters.

mod flatten;

pub use flatten::FlattenRenderer;
