//! File tree adapters.

mod local;
mod memory;

pub use local::LocalTree;
pub use memory::MemoryTree;
