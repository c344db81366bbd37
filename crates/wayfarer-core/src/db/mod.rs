//! SQLite access for the session store.
//!
//! The session file holds a single slot with the most recent itinerary
//! result. Higher layers go through [`crate::store::ResultStore`], which runs
//! these blocking calls off the async runtime.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{Result, StoreResultExt};

pub mod migrations;
pub mod slot_queries;

pub use slot_queries::StoredSlot;

/// Database connection handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens the session file and makes sure the schema is in place.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).store_context("Failed to open session store")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
