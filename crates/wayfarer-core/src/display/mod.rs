//! Display formatting for itineraries, offers and transcripts.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as which offer to highlight or when a
//! stored itinerary was generated. All output is markdown, rendered by the
//! CLI's terminal renderer.
//!
//! ```rust
//! use wayfarer_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Session store cleared");
//! assert_eq!(status.to_string(), "Success: Session store cleared\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{FlightOffers, HotelOffers, Transcript};
pub use datetime::{CalendarDate, LocalDateTime};
pub use results::{GeneratedItinerary, StoredItinerary};
pub use status::OperationStatus;
