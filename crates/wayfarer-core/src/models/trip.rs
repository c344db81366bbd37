//! Trip request model and the field edits that build it.

use std::collections::BTreeSet;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::TravelClass;
use crate::{
    catalog,
    error::{Result, TravelError},
};

/// Largest party size the itinerary service accepts per traveller type.
pub const MAX_TRAVELLERS: u8 = 9;

/// Trip parameters entered on the planner form.
///
/// A fresh request is built when the planner starts and is mutated one
/// [`TripEdit`] at a time. Dates stay optional while editing; [`validate`]
/// is the gate applied at submit time.
///
/// [`validate`]: TripRequest::validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Origin airport or country code
    pub origin: String,

    /// Destination country code
    pub destination: String,

    /// First day in the destination
    pub arrival_date: Option<Date>,

    /// Last day in the destination
    pub departure_date: Option<Date>,

    pub adults: u8,

    pub children: u8,

    pub travel_class: TravelClass,

    /// Whole amount in EUR; `None` leaves the budget to the planner
    pub budget: Option<u32>,

    pub selected_interests: BTreeSet<String>,

    pub preferred_regions: BTreeSet<String>,

    pub special_requests: Option<String>,

    /// e.g. "hotel", "b&b", "self-catering"
    pub accommodation_type: Option<String>,

    /// e.g. "rental car", "public transport"
    pub transportation: Option<String>,

    pub dietary_restrictions: BTreeSet<String>,

    pub accessibility_needs: bool,
}

impl Default for TripRequest {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: catalog::DEFAULT_DESTINATION.to_string(),
            arrival_date: None,
            departure_date: None,
            adults: 1,
            children: 0,
            travel_class: TravelClass::default(),
            budget: None,
            selected_interests: BTreeSet::new(),
            preferred_regions: BTreeSet::new(),
            special_requests: None,
            accommodation_type: None,
            transportation: None,
            dietary_restrictions: BTreeSet::new(),
            accessibility_needs: false,
        }
    }
}

/// A single field update applied to the draft [`TripRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripEdit {
    Origin(String),
    Destination(String),
    ArrivalDate(Option<Date>),
    DepartureDate(Option<Date>),
    Adults(u8),
    Children(u8),
    TravelClass(TravelClass),
    Budget(Option<u32>),
    AddInterest(String),
    RemoveInterest(String),
    AddRegion(String),
    RemoveRegion(String),
    SpecialRequests(Option<String>),
    AccommodationType(Option<String>),
    Transportation(Option<String>),
    AddDietaryRestriction(String),
    RemoveDietaryRestriction(String),
    AccessibilityNeeds(bool),
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TripRequest {
    /// Applies one edit in place.
    ///
    /// Catalogue-backed sets only accept catalogue entries, stored under their
    /// canonical spelling. Date ordering is not checked here;
    /// the form may pass through inconsistent states while the user types.
    ///
    /// # Errors
    ///
    /// Returns `TravelError::Validation` for interests or regions that are not
    /// in the catalogue.
    pub fn apply(&mut self, edit: TripEdit) -> Result<()> {
        match edit {
            TripEdit::Origin(origin) => self.origin = origin.trim().to_uppercase(),
            TripEdit::Destination(destination) => {
                self.destination = destination.trim().to_uppercase();
            }
            TripEdit::ArrivalDate(date) => self.arrival_date = date,
            TripEdit::DepartureDate(date) => self.departure_date = date,
            TripEdit::Adults(adults) => self.adults = adults,
            TripEdit::Children(children) => self.children = children,
            TripEdit::TravelClass(class) => self.travel_class = class,
            TripEdit::Budget(budget) => self.budget = budget,
            TripEdit::AddInterest(value) => {
                let interest = catalog::interest(&value).ok_or_else(|| {
                    TravelError::validation("interests")
                        .with_reason(format!("'{value}' is not a known interest"))
                })?;
                self.selected_interests.insert(interest.to_string());
            }
            TripEdit::RemoveInterest(value) => {
                if let Some(interest) = catalog::interest(&value) {
                    self.selected_interests.remove(interest);
                }
            }
            TripEdit::AddRegion(value) => {
                let region = catalog::region(&value).ok_or_else(|| {
                    TravelError::validation("preferred_regions")
                        .with_reason(format!("'{value}' is not a known region"))
                })?;
                self.preferred_regions.insert(region.to_string());
            }
            TripEdit::RemoveRegion(value) => {
                if let Some(region) = catalog::region(&value) {
                    self.preferred_regions.remove(region);
                }
            }
            TripEdit::SpecialRequests(text) => self.special_requests = non_blank(text),
            TripEdit::AccommodationType(kind) => self.accommodation_type = non_blank(kind),
            TripEdit::Transportation(mode) => self.transportation = non_blank(mode),
            TripEdit::AddDietaryRestriction(value) => {
                if let Some(value) = non_blank(Some(value)) {
                    self.dietary_restrictions.insert(value);
                }
            }
            TripEdit::RemoveDietaryRestriction(value) => {
                self.dietary_restrictions.remove(value.trim());
            }
            TripEdit::AccessibilityNeeds(needed) => self.accessibility_needs = needed,
        }
        Ok(())
    }

    /// Checks the submission invariant.
    ///
    /// Origin, destination and both dates must be present, arrival must not
    /// fall after departure, the party must contain between one and
    /// [`MAX_TRAVELLERS`] adults, and catalogue-backed sets must only hold
    /// catalogue entries.
    ///
    /// # Errors
    ///
    /// Returns `TravelError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.origin.trim().is_empty() {
            return Err(TravelError::validation("origin").with_reason("Origin is required"));
        }
        if self.destination.trim().is_empty() {
            return Err(
                TravelError::validation("destination").with_reason("Destination is required")
            );
        }
        let Some(arrival) = self.arrival_date else {
            return Err(
                TravelError::validation("arrival_date").with_reason("Arrival date is required")
            );
        };
        let Some(departure) = self.departure_date else {
            return Err(TravelError::validation("departure_date")
                .with_reason("Departure date is required"));
        };
        if arrival > departure {
            return Err(TravelError::validation("departure_date").with_reason(format!(
                "Departure date {departure} is before arrival date {arrival}"
            )));
        }
        if !(1..=MAX_TRAVELLERS).contains(&self.adults) {
            return Err(TravelError::validation("adults").with_reason(format!(
                "Between 1 and {MAX_TRAVELLERS} adults are required"
            )));
        }
        if self.children > MAX_TRAVELLERS {
            return Err(TravelError::validation("children")
                .with_reason(format!("At most {MAX_TRAVELLERS} children are supported")));
        }
        if let Some(unknown) = self
            .selected_interests
            .iter()
            .find(|i| catalog::interest(i).is_none())
        {
            return Err(TravelError::validation("interests")
                .with_reason(format!("'{unknown}' is not a known interest")));
        }
        if let Some(unknown) = self
            .preferred_regions
            .iter()
            .find(|r| catalog::region(r).is_none())
        {
            return Err(TravelError::validation("preferred_regions")
                .with_reason(format!("'{unknown}' is not a known region")));
        }
        Ok(())
    }

    /// Number of nights between arrival and departure, once both are set.
    pub fn nights(&self) -> Option<i32> {
        let (arrival, departure) = (self.arrival_date?, self.departure_date?);
        arrival.until(departure).ok().map(|span| span.get_days())
    }
}
