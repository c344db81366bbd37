//! Itinerary result model: narrative plus optional flight and hotel offers.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// The itinerary the assistant produced.
///
/// The service either answers with free text or with a day-by-day plan;
/// both are accepted and rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Narrative {
    Text(String),
    Days(Vec<DayPlan>),
}

impl Narrative {
    /// True when there is nothing to show: blank text or no days.
    pub fn is_empty(&self) -> bool {
        match self {
            Narrative::Text(text) => text.trim().is_empty(),
            Narrative::Days(days) => days.is_empty(),
        }
    }
}

/// One day of a structured itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day index
    pub day: u32,
    pub date: Option<Date>,
    /// County or area the day is spent in
    pub region: String,
    pub activities: Activities,
    pub lodging: Option<Lodging>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activities {
    #[serde(default)]
    pub morning: String,
    #[serde(default)]
    pub afternoon: String,
    #[serde(default)]
    pub evening: String,
}

/// Where the traveller sleeps at the end of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lodging {
    pub name: String,
    pub kind: Option<String>,
    pub check_in: Option<Date>,
    pub check_out: Option<Date>,
}

/// An amount in a given currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    /// ISO 4217 code
    pub currency: String,
}

impl Price {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    /// Departure location code
    pub departure: String,
    /// Arrival location code
    pub arrival: String,
    pub price: Price,
    pub airline: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    pub name: String,
    pub rating: f32,
    pub price: Price,
    pub city: Option<String>,
    pub check_in: Option<Date>,
    pub check_out: Option<Date>,
}

/// The stay window the service allotted to one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayWindow {
    pub start: Date,
    pub end: Date,
}

/// A generated itinerary with its offers.
///
/// Results are produced only by a successful planner submission and are
/// replaced wholesale by the next one; nothing updates them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryResult {
    pub narrative: Narrative,

    #[serde(default)]
    pub flight_offers: Option<Vec<FlightOffer>>,

    #[serde(default)]
    pub hotel_offers: Option<Vec<HotelOffer>>,

    /// Per-region stay windows, keyed by region name
    #[serde(default)]
    pub region_dates: BTreeMap<String, StayWindow>,
}

impl ItineraryResult {
    /// Creates a result with the given narrative and no offers.
    pub fn new(narrative: Narrative) -> Self {
        Self {
            narrative,
            flight_offers: None,
            hotel_offers: None,
            region_dates: BTreeMap::new(),
        }
    }

    /// A result is only usable when its narrative has content.
    pub fn is_valid(&self) -> bool {
        !self.narrative.is_empty()
    }

    /// First flight offer, if any were returned.
    pub fn best_flight(&self) -> Option<&FlightOffer> {
        self.flight_offers.as_ref().and_then(|offers| offers.first())
    }

    /// First hotel offer, if any were returned.
    pub fn best_hotel(&self) -> Option<&HotelOffer> {
        self.hotel_offers.as_ref().and_then(|offers| offers.first())
    }
}
