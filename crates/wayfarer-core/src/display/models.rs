//! Display implementations for domain models.
//!
//! Everything renders as markdown so the CLI can hand it straight to the
//! terminal renderer.

use std::fmt;

use super::datetime::CalendarDate;
use crate::{
    catalog::{self, Airport},
    models::{
        ConversationTurn, DayPlan, FlightOffer, HotelOffer, ItineraryResult, Lodging, Narrative,
        Price, Role, TravelClass, TripRequest,
    },
};

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({}, {})", self.code, self.name, self.city, self.country)
    }
}

impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speaker = match self.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
        };
        writeln!(f, "**{speaker}:**")?;
        writeln!(f)?;
        writeln!(f, "{}", self.text)
    }
}

impl fmt::Display for Lodging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(kind) = &self.kind {
            write!(f, " ({kind})")?;
        }
        Ok(())
    }
}

impl fmt::Display for DayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "### Day {}", self.day)?;
        if !self.region.is_empty() {
            write!(f, ": {}", self.region)?;
        }
        if let Some(date) = &self.date {
            write!(f, " ({})", CalendarDate(date))?;
        }
        writeln!(f)?;
        writeln!(f)?;

        for (slot, activity) in [
            ("Morning", &self.activities.morning),
            ("Afternoon", &self.activities.afternoon),
            ("Evening", &self.activities.evening),
        ] {
            if !activity.trim().is_empty() {
                writeln!(f, "- **{slot}**: {activity}")?;
            }
        }
        if let Some(lodging) = &self.lodging {
            writeln!(f, "- **Stay**: {lodging}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Narrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Narrative::Text(text) => write!(f, "{text}"),
            Narrative::Days(days) => {
                for day in days {
                    write!(f, "{day}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for FlightOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}, {}", self.departure, self.arrival, self.price)?;
        if let Some(airline) = &self.airline {
            write!(f, ", {airline}")?;
        }
        match (&self.departure_time, &self.arrival_time) {
            (Some(departs), Some(arrives)) => write!(f, ", {departs} - {arrives}"),
            (Some(departs), None) => write!(f, ", departs {departs}"),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for HotelOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (rating {:.1}), {}", self.name, self.rating, self.price)?;
        if let Some(city) = &self.city {
            write!(f, ", {city}")?;
        }
        if let (Some(check_in), Some(check_out)) = (&self.check_in, &self.check_out) {
            write!(
                f,
                ", {} to {}",
                CalendarDate(check_in),
                CalendarDate(check_out)
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ItineraryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Your Itinerary")?;
        writeln!(f)?;
        writeln!(f, "{}", self.narrative)?;

        if !self.region_dates.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Where you'll be")?;
            writeln!(f)?;
            for (region, window) in &self.region_dates {
                writeln!(
                    f,
                    "- **{region}**: {} to {}",
                    CalendarDate(&window.start),
                    CalendarDate(&window.end)
                )?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for TripRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_unset = |value: &str| {
            if value.is_empty() {
                "(not set)".to_string()
            } else {
                value.to_string()
            }
        };

        writeln!(f, "## Trip")?;
        writeln!(f)?;
        let origin = match catalog::origin_airport(&self.origin) {
            Some(airport) => format!("{} ({})", airport.code, airport.name),
            None => or_unset(&self.origin),
        };
        writeln!(
            f,
            "- **Route**: {} → {}",
            origin,
            or_unset(&self.destination)
        )?;
        match (&self.arrival_date, &self.departure_date) {
            (Some(arrival), Some(departure)) => writeln!(
                f,
                "- **Dates**: {} to {}",
                CalendarDate(arrival),
                CalendarDate(departure)
            )?,
            (Some(arrival), None) => writeln!(f, "- **Arrival**: {}", CalendarDate(arrival))?,
            (None, Some(departure)) => {
                writeln!(f, "- **Departure**: {}", CalendarDate(departure))?
            }
            (None, None) => writeln!(f, "- **Dates**: (not set)")?,
        }
        writeln!(
            f,
            "- **Travellers**: {} adult(s), {} child(ren)",
            self.adults, self.children
        )?;
        writeln!(f, "- **Class**: {}", self.travel_class)?;
        if let Some(budget) = self.budget {
            writeln!(f, "- **Budget**: {budget} EUR")?;
        }
        if !self.selected_interests.is_empty() {
            let interests: Vec<&str> = self.selected_interests.iter().map(String::as_str).collect();
            writeln!(f, "- **Interests**: {}", interests.join(", "))?;
        }
        if !self.preferred_regions.is_empty() {
            let regions: Vec<&str> = self.preferred_regions.iter().map(String::as_str).collect();
            writeln!(f, "- **Regions**: {}", regions.join(", "))?;
        }
        if let Some(accommodation) = &self.accommodation_type {
            writeln!(f, "- **Accommodation**: {accommodation}")?;
        }
        if let Some(transportation) = &self.transportation {
            writeln!(f, "- **Transport**: {transportation}")?;
        }
        if !self.dietary_restrictions.is_empty() {
            let dietary: Vec<&str> = self
                .dietary_restrictions
                .iter()
                .map(String::as_str)
                .collect();
            writeln!(f, "- **Dietary**: {}", dietary.join(", "))?;
        }
        if self.accessibility_needs {
            writeln!(f, "- **Accessibility needs**: yes")?;
        }
        if let Some(requests) = &self.special_requests {
            writeln!(f, "- **Special requests**: {requests}")?;
        }
        Ok(())
    }
}
