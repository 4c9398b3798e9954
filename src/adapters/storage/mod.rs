//! Storage adapters for the key-value store port.
//!
//! - `InMemoryKeyValueStore` - For testing and development
//! - `JsonFileStore` - JSON file on disk, used by the CLI

mod in_memory_store;
mod json_file_store;

pub use in_memory_store::InMemoryKeyValueStore;
pub use json_file_store::JsonFileStore;
