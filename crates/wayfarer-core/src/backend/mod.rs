//! Boundary between the flows and the itinerary service.
//!
//! The planner and chat flows only ever talk to a [`TravelBackend`]. The
//! production implementation is [`HttpBackend`]; tests substitute scripted
//! backends to drive every outcome without a network.

use async_trait::async_trait;

use crate::{
    error::Result,
    wire::{ChatPayload, ChatReply, HealthStatus, ItineraryResponse, TripPayload},
};

pub mod http;

pub use http::HttpBackend;

/// Operations the itinerary service provides.
///
/// Implementations report failures as `TravelError::Timeout` when the
/// service gave up (gateway timeout) and `TravelError::Transport` for
/// everything else that went wrong on the wire. Time bounds on whole
/// operations are enforced by the callers.
#[async_trait]
pub trait TravelBackend: Send + Sync {
    /// Requests a new itinerary for the trip.
    async fn generate_itinerary(&self, trip: &TripPayload) -> Result<ItineraryResponse>;

    /// Sends one chat message with its context.
    async fn chat(&self, payload: &ChatPayload) -> Result<ChatReply>;

    /// Reports whether the service is up.
    async fn health(&self) -> Result<HealthStatus>;
}
