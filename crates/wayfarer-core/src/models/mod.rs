//! Data models for trip requests, itineraries and chat turns.
//!
//! This module holds the domain shapes shared by the planner and chat flows.
//! Display implementations live in [`crate::display::models`]; the mapping to
//! and from the itinerary service's JSON lives in [`crate::wire`], so the
//! field names used here are the client's own and never the backend's.
//!
//! # Examples
//!
//! ```rust
//! use jiff::civil::date;
//! use wayfarer_core::models::{TripEdit, TripRequest};
//!
//! let mut trip = TripRequest::default();
//! trip.apply(TripEdit::Origin("lhr".to_string()))?;
//! trip.apply(TripEdit::ArrivalDate(Some(date(2025, 6, 1))))?;
//! trip.apply(TripEdit::DepartureDate(Some(date(2025, 6, 8))))?;
//! trip.apply(TripEdit::AddInterest("history".to_string()))?;
//!
//! assert_eq!(trip.origin, "LHR");
//! assert_eq!(trip.nights(), Some(7));
//! trip.validate()?;
//! # Ok::<(), wayfarer_core::TravelError>(())
//! ```

pub mod class;
pub mod conversation;
pub mod itinerary;
pub mod trip;


pub use class::TravelClass;
pub use conversation::{ConversationTurn, Role};
pub use itinerary::{
    Activities, DayPlan, FlightOffer, HotelOffer, ItineraryResult, Lodging, Narrative, Price,
    StayWindow,
};
pub use trip::{TripEdit, TripRequest, MAX_TRAVELLERS};
