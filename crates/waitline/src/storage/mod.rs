//! Storage backend implementations.
//!
//! Concrete implementations of the [`QueueRepository`] trait from
//! `waitline_core::storage`. DynamoDB is the production backend; the
//! in-memory backend serves tests and local development.
//!
//! [`QueueRepository`]: waitline_core::storage::QueueRepository

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;
