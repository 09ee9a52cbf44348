//! Repository filesystem adapters.

mod local;
mod memory;

pub use local::LocalRepoFs;
pub use memory::MemoryRepoFs;
