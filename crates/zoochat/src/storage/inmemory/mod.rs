//! In-memory storage backend.
//!
//! Stores all data in HashMaps wrapped in `Arc<RwLock<_>>`. Used for local
//! development and by the router tests. Data is lost when the process exits.

mod repository;

pub use repository::InMemoryRepository;
