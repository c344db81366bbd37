//! Result wrapper types for displaying itinerary outcomes.

use std::fmt;

use jiff::Timestamp;

use super::{
    collections::{FlightOffers, HotelOffers},
    datetime::LocalDateTime,
};
use crate::models::{ItineraryResult, TripRequest};

/// A freshly generated itinerary, optionally with the request behind it.
pub struct GeneratedItinerary<'a> {
    pub result: &'a ItineraryResult,
    pub request: Option<&'a TripRequest>,
}

impl<'a> GeneratedItinerary<'a> {
    pub fn new(result: &'a ItineraryResult) -> Self {
        Self {
            result,
            request: None,
        }
    }

    pub fn with_request(mut self, request: Option<&'a TripRequest>) -> Self {
        self.request = request;
        self
    }
}

impl fmt::Display for GeneratedItinerary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(request) = self.request {
            writeln!(f, "{request}")?;
        }
        write!(f, "{}", self.result)?;
        fmt_offers(f, self.result)
    }
}

/// The itinerary held in the session store.
pub struct StoredItinerary<'a> {
    pub result: &'a ItineraryResult,
    pub stored_at: &'a Timestamp,
}

impl fmt::Display for StoredItinerary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "_Generated {}_", LocalDateTime(self.stored_at))?;
        writeln!(f)?;
        write!(f, "{}", self.result)?;
        fmt_offers(f, self.result)
    }
}

fn fmt_offers(f: &mut fmt::Formatter<'_>, result: &ItineraryResult) -> fmt::Result {
    if let Some(flights) = &result.flight_offers {
        writeln!(f)?;
        write!(f, "{}", FlightOffers(flights.clone()))?;
    }
    if let Some(hotels) = &result.hotel_offers {
        writeln!(f)?;
        write!(f, "{}", HotelOffers(hotels.clone()))?;
    }
    Ok(())
}
