//! Core domain logic for the waitline waitlist manager.
//!
//! This crate contains the pure, I/O-free parts of the system: the queue
//! entry types, the wait-time heuristic and queue statistics, the status
//! transition rules, and the repository abstraction the storage backends
//! implement.

pub mod queue;
pub mod storage;
