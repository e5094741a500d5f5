mod entry;

pub use entry::{CreateEntry, DeleteResponse, ListQuery, ListResponse, UpdateEntry};
