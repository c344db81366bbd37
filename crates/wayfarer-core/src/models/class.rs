//! Cabin class enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of cabin classes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl FromStr for TravelClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "economy" => Ok(TravelClass::Economy),
            "premium_economy" | "premiumeconomy" => Ok(TravelClass::PremiumEconomy),
            "business" => Ok(TravelClass::Business),
            "first" => Ok(TravelClass::First),
            _ => Err(format!("Invalid travel class: {s}")),
        }
    }
}

impl TravelClass {
    /// Every class, in cabin order.
    pub const ALL: [TravelClass; 4] = [
        TravelClass::Economy,
        TravelClass::PremiumEconomy,
        TravelClass::Business,
        TravelClass::First,
    ];

    /// Wire representation expected by the itinerary service.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TravelClass::Economy => "Economy",
            TravelClass::PremiumEconomy => "Premium Economy",
            TravelClass::Business => "Business",
            TravelClass::First => "First",
        }
    }
}
