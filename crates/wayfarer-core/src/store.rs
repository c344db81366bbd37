//! Session-wide slot holding the most recent itinerary result.
//!
//! The planner writes the slot after every successful submission, the chat
//! view reads it when no handoff is available, and `wf reset` empties it.
//! Nothing else touches it.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use crate::{
    db::{Database, StoredSlot},
    error::{Result, TravelError},
    models::ItineraryResult,
};

/// Handle to the session store file.
///
/// Cloning is cheap; clones refer to the same file.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    /// Opens (creating if needed) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TravelError::FileSystem` if the parent directory cannot be
    /// created and `TravelError::Storage` if the schema cannot be applied.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TravelError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Self { path };
        store.run(|_| Ok(())).await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the slot with `result`.
    pub async fn put(&self, result: &ItineraryResult) -> Result<()> {
        let result = result.clone();
        self.run(move |db| db.put_result(&result)).await?;
        debug!("Stored itinerary result in {}", self.path.display());
        Ok(())
    }

    /// Returns the stored result, if any.
    pub async fn get(&self) -> Result<Option<ItineraryResult>> {
        Ok(self.entry().await?.map(|slot| slot.result))
    }

    /// Returns the stored result together with when it was written.
    pub async fn entry(&self) -> Result<Option<StoredSlot>> {
        self.run(|db| db.get_result()).await
    }

    /// Empties the slot. Returns whether a result was removed.
    pub async fn clear(&self) -> Result<bool> {
        self.run(|db| db.clear_result()).await
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&path)?;
            op(&db)
        })
        .await
        .map_err(|e| TravelError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
