//! Core library for the Wayfarer travel planner.
//!
//! Wayfarer collects a trip request, asks an itinerary service for a
//! day-by-day plan with flight and hotel offers, keeps the latest plan in a
//! session store, and lets the traveller chat about it.
//!
//! # Flows
//!
//! - [`PlannerFlow`]: edits a draft [`TripRequest`], validates it and submits
//!   it. A success is stored and handed over as a [`ChatHandoff`].
//! - [`ChatFlow`]: seeded from a handoff or the [`ResultStore`], sends one
//!   chat request per message and keeps the transcript.
//!
//! Both flows talk to the service through the [`TravelBackend`] trait;
//! [`HttpBackend`] is the production implementation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use wayfarer_core::{models::TripEdit, TravelClientBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TravelClientBuilder::new()
//!     .with_store_path(Some("session.db"))
//!     .build()
//!     .await?;
//!
//! let planner = client.planner();
//! planner.edit(TripEdit::Origin("CDG".to_string()))?;
//! planner.edit(TripEdit::ArrivalDate(Some(date(2025, 9, 10))))?;
//! planner.edit(TripEdit::DepartureDate(Some(date(2025, 9, 17))))?;
//! planner.edit(TripEdit::AddRegion("Clare".to_string()))?;
//!
//! let handoff = planner.submit_draft().await?;
//! let chat = client.chat(Some(handoff)).await?;
//! let reply = chat.send("Where can I hear traditional music?").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod catalog;
pub mod chat;
pub mod client;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod planner;
pub mod store;
pub mod wire;

// Re-export commonly used types
pub use backend::{HttpBackend, TravelBackend};
pub use chat::{ChatFlow, ChatState};
pub use client::{TravelClient, TravelClientBuilder};
pub use display::{
    FlightOffers, GeneratedItinerary, HotelOffers, OperationStatus, StoredItinerary, Transcript,
};
pub use error::{ErrorKind, Result, TravelError, CHAT_APOLOGY, TIMEOUT_NOTICE};
pub use models::{
    ConversationTurn, ItineraryResult, Narrative, Role, TravelClass, TripEdit, TripRequest,
};
pub use planner::{ChatHandoff, PlannerFlow, PlannerState};
pub use store::ResultStore;
