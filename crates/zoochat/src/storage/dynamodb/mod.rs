//! DynamoDB storage backend implementation.
//!
//! Single-table layout, see [`keys`] for the key patterns of every entity.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbRepository;
