//! AWS DynamoDB storage backend.
//!
//! Items live in a single table keyed by `id`, with a `StatusIndex` GSI
//! (status HASH, checkInTime RANGE) serving the filtered list path.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
