//! Persistence module split across logical submodules.

mod connection;
mod records;
mod seed;

pub use connection::{ensure_schema, open_in_memory};
pub use records::{delete_records, fetch_records, insert_record, StorageError};
pub use seed::{clear_records, next_crn, seed_records};
