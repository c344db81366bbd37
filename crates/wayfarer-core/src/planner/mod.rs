//! Trip planning flow: draft editing and itinerary submission.
//!
//! [`PlannerFlow`] owns the draft trip request the user is filling in and
//! drives exactly one itinerary request per submission:
//!
//! ```text
//!            edit()                     backend ok, narrative present
//!   ┌─────────┐  submit()  ┌────────────┐ ────────────────▶ ┌───────────┐
//!   │ Editing │ ─────────▶ │ Submitting │                   │ Succeeded │
//!   └─────────┘            └────────────┘ ────────────────▶ ├───────────┤
//!        ▲                                timeout, transport │  Failed   │
//!        └──────────────── edit() ─────────────────────────── └───────────┘
//! ```
//!
//! Validation happens before anything leaves the process; an invalid request
//! never reaches the backend. A successful submission is written to the
//! [`ResultStore`] and handed back as a [`ChatHandoff`] for the chat view.
//! Failed submissions leave the store untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use wayfarer_core::{models::TripEdit, TravelClientBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TravelClientBuilder::new().build().await?;
//! let planner = client.planner();
//!
//! planner.edit(TripEdit::Origin("LHR".to_string()))?;
//! planner.edit(TripEdit::ArrivalDate(Some(date(2025, 6, 1))))?;
//! planner.edit(TripEdit::DepartureDate(Some(date(2025, 6, 8))))?;
//!
//! let handoff = planner.submit_draft().await?;
//! println!("{}", handoff.result.narrative);
//! # Ok(())
//! # }
//! ```

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use log::{info, warn};
use tokio::time;

use crate::{
    backend::TravelBackend,
    error::{ErrorKind, Result, TravelError},
    models::{ItineraryResult, TripEdit, TripRequest},
    store::ResultStore,
    wire::TripPayload,
};


/// Default bound on a single itinerary request.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Where the planner is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerState {
    Editing,
    Submitting,
    Succeeded { result: ItineraryResult },
    Failed { kind: ErrorKind, message: String },
}

impl PlannerState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, PlannerState::Submitting)
    }
}

/// What a successful submission passes on to the chat view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatHandoff {
    pub result: ItineraryResult,
    /// The request that produced `result`
    pub request: Option<TripRequest>,
}

struct PlannerInner {
    state: PlannerState,
    draft: TripRequest,
}

/// Planner flow for one user session.
pub struct PlannerFlow {
    backend: Arc<dyn TravelBackend>,
    store: ResultStore,
    submit_timeout: Duration,
    inner: Mutex<PlannerInner>,
}

impl PlannerFlow {
    pub fn new(backend: Arc<dyn TravelBackend>, store: ResultStore) -> Self {
        Self {
            backend,
            store,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
            inner: Mutex::new(PlannerInner {
                state: PlannerState::Editing,
                draft: TripRequest::default(),
            }),
        }
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn state(&self) -> PlannerState {
        self.lock().state.clone()
    }

    /// Snapshot of the draft being edited.
    pub fn draft(&self) -> TripRequest {
        self.lock().draft.clone()
    }

    /// Applies one field update to the draft and returns the new snapshot.
    ///
    /// Editing after a success or failure puts the planner back into
    /// `Editing`.
    ///
    /// # Errors
    ///
    /// Returns `TravelError::Busy` while a submission is in flight and
    /// `TravelError::Validation` for catalogue values that do not exist.
    pub fn edit(&self, edit: TripEdit) -> Result<TripRequest> {
        let mut inner = self.lock();
        if inner.state.is_submitting() {
            return Err(TravelError::Busy {
                operation: "itinerary",
            });
        }
        inner.draft.apply(edit)?;
        inner.state = PlannerState::Editing;
        Ok(inner.draft.clone())
    }

    /// Submits a frozen copy of the current draft.
    pub async fn submit_draft(&self) -> Result<ChatHandoff> {
        let request = self.draft();
        self.submit(request).await
    }

    /// Validates `request`, asks the backend for an itinerary and stores it.
    ///
    /// # Errors
    ///
    /// - `Busy` if another submission is in flight (no call is made)
    /// - `Validation` if the request is not well formed (no call is made)
    /// - `Timeout` if the backend does not answer in time or reports a
    ///   gateway timeout
    /// - `Transport` for network failures and other non-success statuses
    /// - `EmptyResult` if the backend answered without a narrative
    pub async fn submit(&self, request: TripRequest) -> Result<ChatHandoff> {
        {
            let mut inner = self.lock();
            if inner.state.is_submitting() {
                return Err(TravelError::Busy {
                    operation: "itinerary",
                });
            }
            if let Err(e) = request.validate() {
                inner.state = PlannerState::Editing;
                return Err(e);
            }
            inner.state = PlannerState::Submitting;
        }

        let mut guard = SubmitGuard {
            flow: self,
            armed: true,
        };
        let outcome = self.generate(&request).await;
        guard.armed = false;
        drop(guard);

        let mut inner = self.lock();
        match outcome {
            Ok(result) => {
                info!(
                    "Itinerary generated for {} -> {}",
                    request.origin, request.destination
                );
                inner.state = PlannerState::Succeeded {
                    result: result.clone(),
                };
                inner.draft = TripRequest::default();
                Ok(ChatHandoff {
                    result,
                    request: Some(request),
                })
            }
            Err(e) => {
                warn!("Itinerary request failed: {e}");
                inner.state = PlannerState::Failed {
                    kind: e.kind(),
                    message: e.user_message(),
                };
                Err(e)
            }
        }
    }

    async fn generate(&self, request: &TripRequest) -> Result<ItineraryResult> {
        let payload = TripPayload::from(request);
        let response = time::timeout(
            self.submit_timeout,
            self.backend.generate_itinerary(&payload),
        )
        .await
        .map_err(|_| {
            TravelError::timeout(format!(
                "no itinerary after {}s",
                self.submit_timeout.as_secs()
            ))
        })??;

        let result = response.into_result()?;
        self.store.put(&result).await?;
        Ok(result)
    }

    fn lock(&self) -> MutexGuard<'_, PlannerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the planner to `Editing` if a submission future is dropped
/// before it completes.
struct SubmitGuard<'a> {
    flow: &'a PlannerFlow,
    armed: bool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.flow.lock();
        if inner.state.is_submitting() {
            warn!("Itinerary submission abandoned before completion");
            inner.state = PlannerState::Editing;
        }
    }
}
