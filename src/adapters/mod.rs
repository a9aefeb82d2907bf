// Adapters layer: concrete implementations of the domain ports.

pub mod memory;
pub mod storage;

pub use memory::{InMemoryStore, NextIds, Snapshot};
pub use storage::LocalStorage;
