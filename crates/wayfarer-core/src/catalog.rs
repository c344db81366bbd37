//! Fixed catalogues the trip form draws its choices from.
//!
//! Interests and preferred regions on a [`crate::TripRequest`] must come from
//! these lists. Lookups are case-insensitive and return the canonical
//! spelling so that `"food & drink"` and `"Food & Drink"` select the same
//! entry.

/// Country the itinerary service plans trips for.
pub const DEFAULT_DESTINATION: &str = "IE";

/// Interests a traveller can select.
pub const INTERESTS: &[&str] = &[
    "History",
    "Culture",
    "Nature",
    "Food & Drink",
    "Adventure",
    "Relaxation",
    "Shopping",
    "Nightlife",
    "Family Activities",
    "Art & Museums",
    "Music",
    "Sports",
    "Architecture",
    "Photography",
    "Local Experiences",
];

/// Counties of the island of Ireland, used as preferred regions.
pub const REGIONS: &[&str] = &[
    "Antrim",
    "Armagh",
    "Carlow",
    "Cavan",
    "Clare",
    "Cork",
    "Derry",
    "Donegal",
    "Down",
    "Dublin",
    "Fermanagh",
    "Galway",
    "Kerry",
    "Kildare",
    "Kilkenny",
    "Laois",
    "Leitrim",
    "Limerick",
    "Longford",
    "Louth",
    "Mayo",
    "Meath",
    "Monaghan",
    "Offaly",
    "Roscommon",
    "Sligo",
    "Tipperary",
    "Tyrone",
    "Waterford",
    "Westmeath",
    "Wexford",
    "Wicklow",
];

/// A departure airport offered by the trip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
}

const fn airport(
    code: &'static str,
    name: &'static str,
    city: &'static str,
    country: &'static str,
) -> Airport {
    Airport {
        code,
        name,
        city,
        country,
    }
}

/// Major European airports suggested as trip origins.
pub const ORIGIN_AIRPORTS: &[Airport] = &[
    airport("LHR", "London Heathrow", "London", "United Kingdom"),
    airport("CDG", "Paris Charles de Gaulle", "Paris", "France"),
    airport("AMS", "Amsterdam Schiphol", "Amsterdam", "Netherlands"),
    airport("FRA", "Frankfurt International", "Frankfurt", "Germany"),
    airport("MAD", "Madrid Barajas", "Madrid", "Spain"),
    airport("BCN", "Barcelona El Prat", "Barcelona", "Spain"),
    airport("FCO", "Rome Fiumicino", "Rome", "Italy"),
    airport("MXP", "Milan Malpensa", "Milan", "Italy"),
    airport("ZRH", "Zurich Airport", "Zurich", "Switzerland"),
    airport("VIE", "Vienna International", "Vienna", "Austria"),
    airport("BRU", "Brussels Airport", "Brussels", "Belgium"),
    airport("CPH", "Copenhagen Airport", "Copenhagen", "Denmark"),
    airport("ARN", "Stockholm Arlanda", "Stockholm", "Sweden"),
    airport("OSL", "Oslo Gardermoen", "Oslo", "Norway"),
    airport("HEL", "Helsinki Airport", "Helsinki", "Finland"),
    airport("WAW", "Warsaw Chopin", "Warsaw", "Poland"),
    airport("PRG", "Prague Václav Havel", "Prague", "Czech Republic"),
    airport("BUD", "Budapest Ferenc Liszt", "Budapest", "Hungary"),
    airport("IST", "Istanbul Airport", "Istanbul", "Turkey"),
    airport("ATH", "Athens International", "Athens", "Greece"),
    airport("LIS", "Lisbon Portela", "Lisbon", "Portugal"),
    airport("OPO", "Porto Airport", "Porto", "Portugal"),
    airport("DUB", "Dublin Airport", "Dublin", "Ireland"),
    airport("EDI", "Edinburgh Airport", "Edinburgh", "United Kingdom"),
    airport("MAN", "Manchester Airport", "Manchester", "United Kingdom"),
    airport("GLA", "Glasgow International", "Glasgow", "United Kingdom"),
    airport("BHX", "Birmingham Airport", "Birmingham", "United Kingdom"),
    airport("NCE", "Nice Côte d'Azur", "Nice", "France"),
    airport("MUC", "Munich Airport", "Munich", "Germany"),
    airport("BER", "Berlin Brandenburg", "Berlin", "Germany"),
];

fn lookup(catalogue: &'static [&'static str], value: &str) -> Option<&'static str> {
    let value = value.trim();
    catalogue
        .iter()
        .copied()
        .find(|entry| entry.eq_ignore_ascii_case(value))
}

/// Canonical spelling of an interest, if it is in the catalogue.
pub fn interest(value: &str) -> Option<&'static str> {
    lookup(INTERESTS, value)
}

/// Canonical spelling of a region, if it is in the catalogue.
pub fn region(value: &str) -> Option<&'static str> {
    lookup(REGIONS, value)
}

/// Airport entry for an IATA code, if it is one of the suggested origins.
pub fn origin_airport(code: &str) -> Option<&'static Airport> {
    let code = code.trim();
    ORIGIN_AIRPORTS
        .iter()
        .find(|airport| airport.code.eq_ignore_ascii_case(code))
}
