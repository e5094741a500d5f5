pub mod error;
pub mod health;
pub mod queue;

pub use error::ApiError;
