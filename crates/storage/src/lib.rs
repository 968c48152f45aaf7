#![forbid(unsafe_code)]

pub mod repository;
pub mod session_store;
pub mod sqlite;

pub use repository::{InMemoryRepository, KeyValueRepository, Storage, StorageError, StoreKey};
pub use session_store::SessionStore;
