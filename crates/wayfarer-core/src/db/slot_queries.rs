//! Reads and writes of the single itinerary slot.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{Result, StoreResultExt},
    models::ItineraryResult,
};

const UPSERT_SLOT_SQL: &str = "INSERT INTO itinerary_slot (id, payload, stored_at) VALUES (1, ?1, ?2) \
     ON CONFLICT(id) DO UPDATE SET payload = excluded.payload, stored_at = excluded.stored_at";
const SELECT_SLOT_SQL: &str = "SELECT payload, stored_at FROM itinerary_slot WHERE id = 1";
const DELETE_SLOT_SQL: &str = "DELETE FROM itinerary_slot";

/// The stored result together with the time it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSlot {
    pub result: ItineraryResult,
    pub stored_at: Timestamp,
}

impl super::Database {
    /// Replaces whatever the slot held with `result`.
    pub fn put_result(&self, result: &ItineraryResult) -> Result<StoredSlot> {
        let payload = serde_json::to_string(result)?;
        let now = Timestamp::now();

        self.connection
            .execute(UPSERT_SLOT_SQL, params![payload, now.to_string()])
            .store_context("Failed to write itinerary slot")?;

        Ok(StoredSlot {
            result: result.clone(),
            stored_at: now,
        })
    }

    /// Reads the slot.
    ///
    /// A payload that no longer decodes is reported as an empty slot.
    pub fn get_result(&self) -> Result<Option<StoredSlot>> {
        let row = self
            .connection
            .query_row(SELECT_SLOT_SQL, [], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .optional()
            .store_context("Failed to read itinerary slot")?;

        let Some((payload, stored_at)) = row else {
            return Ok(None);
        };

        let result = match serde_json::from_str::<ItineraryResult>(&payload) {
            Ok(result) => result,
            Err(e) => {
                warn!("Ignoring undecodable itinerary slot: {e}");
                return Ok(None);
            }
        };
        let stored_at = stored_at.parse::<Timestamp>().unwrap_or_else(|e| {
            warn!("Invalid stored_at timestamp '{stored_at}': {e}");
            Timestamp::UNIX_EPOCH
        });

        Ok(Some(StoredSlot { result, stored_at }))
    }

    /// Empties the slot. Returns whether anything was removed.
    pub fn clear_result(&self) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_SLOT_SQL, [])
            .store_context("Failed to clear itinerary slot")?;
        Ok(removed > 0)
    }
}
