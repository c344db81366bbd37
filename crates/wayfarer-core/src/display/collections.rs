//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case and highlights the first entry where
//! the service ranks its offers.

use std::fmt;

use crate::models::{ConversationTurn, FlightOffer, HotelOffer};

/// Newtype wrapper for displaying flight offers, best first.
///
/// # Examples
///
/// ```rust
/// use wayfarer_core::{
///     display::FlightOffers,
///     models::{FlightOffer, Price},
/// };
///
/// let offers = FlightOffers(vec![FlightOffer {
///     departure: "LHR".to_string(),
///     arrival: "DUB".to_string(),
///     price: Price::new(89.5, "EUR"),
///     airline: Some("Aer Lingus".to_string()),
///     departure_time: None,
///     arrival_time: None,
/// }]);
///
/// let output = offers.to_string();
/// assert!(output.contains("Top option"));
/// assert!(output.contains("LHR → DUB"));
/// ```
pub struct FlightOffers(pub Vec<FlightOffer>);

impl fmt::Display for FlightOffers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_offers(f, "Flights", "No flight offers found.", &self.0)
    }
}

/// Newtype wrapper for displaying hotel offers, best first.
pub struct HotelOffers(pub Vec<HotelOffer>);

impl fmt::Display for HotelOffers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_offers(f, "Hotels", "No hotel offers found.", &self.0)
    }
}

fn fmt_offers<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    heading: &str,
    empty: &str,
    offers: &[T],
) -> fmt::Result {
    writeln!(f, "## {heading}")?;
    writeln!(f)?;
    let Some((best, rest)) = offers.split_first() else {
        return writeln!(f, "{empty}");
    };
    writeln!(f, "**Top option**: {best}")?;
    if !rest.is_empty() {
        writeln!(f)?;
        for offer in rest {
            writeln!(f, "- {offer}")?;
        }
    }
    Ok(())
}

/// Newtype wrapper for displaying a chat transcript in order.
pub struct Transcript(pub Vec<ConversationTurn>);

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No messages yet.");
        }
        for (index, turn) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f, "---")?;
                writeln!(f)?;
            }
            write!(f, "{turn}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}
