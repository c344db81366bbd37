//! Entry point tying the backend, the session store and the flows together.
//!
//! ```rust,no_run
//! use wayfarer_core::TravelClientBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TravelClientBuilder::new()
//!     .with_base_url(Some("http://localhost:8000"))
//!     .with_store_path(Some("/tmp/wayfarer/session.db"))
//!     .build()
//!     .await?;
//!
//! // Chat about whatever the last planning session produced
//! let chat = client.chat(None).await?;
//! println!("{:?}", chat.state());
//! # Ok(())
//! # }
//! ```

use std::{sync::Arc, time::Duration};

use crate::{
    backend::TravelBackend,
    chat::ChatFlow,
    error::Result,
    planner::{ChatHandoff, PlannerFlow},
    store::ResultStore,
    wire::HealthStatus,
};

pub mod builder;

pub use builder::TravelClientBuilder;

/// Configured travel client.
pub struct TravelClient {
    backend: Arc<dyn TravelBackend>,
    store: ResultStore,
    submit_timeout: Duration,
    chat_timeout: Duration,
}

impl TravelClient {
    pub(crate) fn new(
        backend: Arc<dyn TravelBackend>,
        store: ResultStore,
        submit_timeout: Duration,
        chat_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            store,
            submit_timeout,
            chat_timeout,
        }
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// A fresh planner with an empty draft.
    pub fn planner(&self) -> PlannerFlow {
        PlannerFlow::new(self.backend.clone(), self.store.clone())
            .with_submit_timeout(self.submit_timeout)
    }

    /// A chat seeded from `handoff`, or from the store when there is none.
    pub async fn chat(&self, handoff: Option<ChatHandoff>) -> Result<ChatFlow> {
        Ok(ChatFlow::seed(self.backend.clone(), handoff, &self.store)
            .await?
            .with_chat_timeout(self.chat_timeout))
    }

    /// Asks the backend whether it is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.backend.health().await
    }
}
