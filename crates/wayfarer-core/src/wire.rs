//! JSON shapes exchanged with the itinerary service.
//!
//! The service grew several spellings for the same concepts (`county`,
//! `location` and `region`; `hotel_name` and `name`; flat `price_eur` and
//! nested `price` objects). Everything here is tolerant on the way in and
//! exact on the way out, and converts into the single domain model in
//! [`crate::models`].

use std::collections::BTreeMap;

use jiff::civil::Date;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{Result, TravelError},
    models::{
        Activities, ConversationTurn, DayPlan, FlightOffer, HotelOffer, ItineraryResult, Lodging,
        Narrative, Price, Role, StayWindow, TravelClass, TripRequest,
    },
};

/// Currency assumed for flat `*_eur` price fields.
const DEFAULT_CURRENCY: &str = "EUR";

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /api/travel/generate-itinerary`, also sent as chat context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPayload {
    pub origin_country: String,
    pub destination_country: String,
    pub arrival_date: Option<Date>,
    pub departure_date: Option<Date>,
    pub adults: u8,
    pub children: u8,
    pub travel_class: TravelClass,
    pub interests: Vec<String>,
    /// The service declares the budget as a string; omitted when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    pub preferred_counties: Vec<String>,
    pub special_requests: String,
    pub accommodation_type: Option<String>,
    pub transportation: Option<String>,
    pub dietary_restrictions: Vec<String>,
    pub accessibility_needs: bool,
}

impl From<&TripRequest> for TripPayload {
    fn from(trip: &TripRequest) -> Self {
        Self {
            origin_country: trip.origin.clone(),
            destination_country: trip.destination.clone(),
            arrival_date: trip.arrival_date,
            departure_date: trip.departure_date,
            adults: trip.adults,
            children: trip.children,
            travel_class: trip.travel_class,
            interests: trip.selected_interests.iter().cloned().collect(),
            budget: trip.budget.map(|budget| budget.to_string()),
            preferred_counties: trip.preferred_regions.iter().cloned().collect(),
            special_requests: trip.special_requests.clone().unwrap_or_default(),
            accommodation_type: trip.accommodation_type.clone(),
            transportation: trip.transportation.clone(),
            dietary_restrictions: trip.dietary_restrictions.iter().cloned().collect(),
            accessibility_needs: trip.accessibility_needs,
        }
    }
}

/// A prior transcript turn as the chat endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&ConversationTurn> for HistoryEntry {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            role: turn.role,
            content: turn.text.clone(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_data: Option<TripPayload>,
    #[serde(default)]
    pub conversation_history: Vec<HistoryEntry>,
}

impl ChatPayload {
    pub fn new(
        message: impl Into<String>,
        trip: Option<&TripRequest>,
        history: &[ConversationTurn],
    ) -> Self {
        Self {
            message: message.into(),
            travel_data: trip.map(TripPayload::from),
            conversation_history: history.iter().map(HistoryEntry::from).collect(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Body returned by the itinerary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub itinerary: Option<Value>,
    #[serde(default)]
    pub flights: Option<OfferEnvelope>,
    #[serde(default)]
    pub hotels: Option<OfferEnvelope>,
    /// Region name to `{start_date, end_date}`; entries are checked one by
    /// one in [`ItineraryResponse::into_result`]
    #[serde(default)]
    pub county_dates: Option<BTreeMap<String, Value>>,
}

/// `{ "data": [...] }` wrapper around offer records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferEnvelope {
    #[serde(default)]
    pub data: Value,
}

#[derive(Deserialize)]
struct CountyDatesDto {
    start_date: String,
    end_date: String,
}

/// Body returned by the chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub itinerary: Option<Value>,
    #[serde(default)]
    pub travel_info: Option<Value>,
}

/// Body returned by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

impl ItineraryResponse {
    /// Converts the service's answer into a domain result.
    ///
    /// Offer records that do not carry the minimum fields are skipped.
    ///
    /// # Errors
    ///
    /// Returns `TravelError::EmptyResult` when the answer has no usable
    /// narrative.
    pub fn into_result(self) -> Result<ItineraryResult> {
        let narrative = self
            .itinerary
            .as_ref()
            .and_then(parse_narrative)
            .filter(|narrative| !narrative.is_empty())
            .ok_or(TravelError::EmptyResult)?;

        let flight_offers = self
            .flights
            .as_ref()
            .map(|envelope| parse_offers(&envelope.data, "flights", parse_flight));
        let hotel_offers = self
            .hotels
            .as_ref()
            .map(|envelope| parse_offers(&envelope.data, "hotels", parse_hotel));

        let region_dates = self
            .county_dates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(region, value)| match parse_stay_window(&value) {
                Some(window) => Some((region, window)),
                None => {
                    debug!("Skipping malformed county dates for {region}");
                    None
                }
            })
            .collect();

        Ok(ItineraryResult {
            narrative,
            flight_offers,
            hotel_offers,
            region_dates,
        })
    }
}

/// Accepts `YYYY-MM-DD` as well as full timestamps that start with one.
fn parse_date(value: &str) -> Option<Date> {
    value.trim().get(..10)?.parse().ok()
}

fn parse_stay_window(value: &Value) -> Option<StayWindow> {
    let dates = CountyDatesDto::deserialize(value).ok()?;
    Some(StayWindow {
        start: parse_date(&dates.start_date)?,
        end: parse_date(&dates.end_date)?,
    })
}

fn parse_narrative(value: &Value) -> Option<Narrative> {
    match value {
        Value::String(text) => Some(Narrative::Text(text.clone())),
        Value::Array(days) => Some(Narrative::Days(parse_days(days))),
        Value::Object(map) => map
            .get("daily_itinerary")
            .and_then(Value::as_array)
            .map(|days| Narrative::Days(parse_days(days))),
        _ => None,
    }
}

#[derive(Deserialize)]
struct DayDto {
    #[serde(default)]
    day: Option<u32>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default, alias = "county", alias = "location")]
    region: Option<String>,
    #[serde(default)]
    activities: Option<ActivitiesDto>,
    #[serde(default, alias = "accommodation", alias = "hotel")]
    lodging: Option<LodgingDto>,
}

/// Slots may be missing or `null`.
#[derive(Deserialize)]
struct ActivitiesDto {
    #[serde(default)]
    morning: Option<String>,
    #[serde(default)]
    afternoon: Option<String>,
    #[serde(default)]
    evening: Option<String>,
}

impl From<ActivitiesDto> for Activities {
    fn from(dto: ActivitiesDto) -> Self {
        Activities {
            morning: dto.morning.unwrap_or_default(),
            afternoon: dto.afternoon.unwrap_or_default(),
            evening: dto.evening.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LodgingDto {
    Name(String),
    Detailed {
        #[serde(alias = "location", alias = "hotel_name")]
        name: String,
        #[serde(default, rename = "type")]
        kind: Option<String>,
        #[serde(default, alias = "checkIn")]
        check_in: Option<String>,
        #[serde(default, alias = "checkOut")]
        check_out: Option<String>,
    },
}

impl From<LodgingDto> for Lodging {
    fn from(dto: LodgingDto) -> Self {
        match dto {
            LodgingDto::Name(name) => Lodging {
                name,
                kind: None,
                check_in: None,
                check_out: None,
            },
            LodgingDto::Detailed {
                name,
                kind,
                check_in,
                check_out,
            } => Lodging {
                name,
                kind,
                check_in: check_in.as_deref().and_then(parse_date),
                check_out: check_out.as_deref().and_then(parse_date),
            },
        }
    }
}

fn parse_days(values: &[Value]) -> Vec<DayPlan> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match DayDto::deserialize(value) {
            Ok(dto) => Some(DayPlan {
                day: dto.day.unwrap_or(index as u32 + 1),
                date: dto.date.as_deref().and_then(parse_date),
                region: dto.region.unwrap_or_default(),
                activities: dto.activities.map(Activities::from).unwrap_or_default(),
                lodging: dto.lodging.map(Lodging::from),
            }),
            Err(e) => {
                debug!("Skipping malformed itinerary day {index}: {e}");
                None
            }
        })
        .collect()
}

/// Offer records may sit directly in `data` or one level down under
/// `data.flights` / `data.hotels`.
fn parse_offers<T>(data: &Value, nested_key: &str, parse: fn(&Value) -> Option<T>) -> Vec<T> {
    let records = match data {
        Value::Array(records) => records.as_slice(),
        Value::Object(map) => map
            .get(nested_key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };
    records
        .iter()
        .filter_map(|record| {
            let offer = parse(record);
            if offer.is_none() {
                debug!("Skipping {nested_key} offer without required fields");
            }
            offer
        })
        .collect()
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Either `price: {amount|total, currency|currency_code}` or a flat
/// `*_eur` field.
fn price(record: &Value, flat_eur_keys: &[&str]) -> Option<Price> {
    if let Some(nested) = record.get("price") {
        if let Some(amount) = number(nested) {
            let currency = text(record, &["currency", "currency_code"])
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
            return Some(Price::new(amount, currency));
        }
        let amount = nested
            .get("amount")
            .or_else(|| nested.get("total"))
            .and_then(number)?;
        let currency = text(nested, &["currency", "currency_code"])?;
        return Some(Price::new(amount, currency));
    }
    flat_eur_keys
        .iter()
        .find_map(|key| record.get(*key).and_then(number))
        .map(|amount| Price::new(amount, DEFAULT_CURRENCY))
}

fn parse_flight(record: &Value) -> Option<FlightOffer> {
    Some(FlightOffer {
        departure: text(record, &["departure", "origin", "departure_airport"])?,
        arrival: text(record, &["arrival", "destination", "arrival_airport"])?,
        price: price(record, &["price_eur"])?,
        airline: text(record, &["airline"]),
        departure_time: text(record, &["departure_time"]),
        arrival_time: text(record, &["arrival_time"]),
    })
}

fn parse_hotel(record: &Value) -> Option<HotelOffer> {
    Some(HotelOffer {
        name: text(record, &["name", "hotel_name"])?,
        rating: ["rating", "review_score"]
            .iter()
            .find_map(|key| record.get(*key).and_then(number))? as f32,
        price: price(record, &["total_price_eur", "price_per_night_eur"])?,
        city: text(record, &["city"]),
        check_in: text(record, &["check_in"]).as_deref().and_then(parse_date),
        check_out: text(record, &["check_out"]).as_deref().and_then(parse_date),
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use serde_json::json;

    use super::*;
    use crate::models::TripEdit;

    fn create_test_trip() -> TripRequest {
        let mut trip = TripRequest::default();
        trip.apply(TripEdit::Origin("LHR".to_string())).unwrap();
        trip.apply(TripEdit::ArrivalDate(Some(date(2025, 6, 1))))
            .unwrap();
        trip.apply(TripEdit::DepartureDate(Some(date(2025, 6, 8))))
            .unwrap();
        trip.apply(TripEdit::Adults(2)).unwrap();
        trip.apply(TripEdit::Budget(Some(1500))).unwrap();
        trip.apply(TripEdit::AddRegion("Kerry".to_string())).unwrap();
        trip.apply(TripEdit::AddInterest("Music".to_string())).unwrap();
        trip
    }

    #[test]
    fn test_trip_payload_uses_service_field_names() {
        let payload = TripPayload::from(&create_test_trip());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["origin_country"], "LHR");
        assert_eq!(json["arrival_date"], "2025-06-01");
        assert_eq!(json["departure_date"], "2025-06-08");
        assert_eq!(json["adults"], 2);
        assert_eq!(json["children"], 0);
        assert_eq!(json["travel_class"], "ECONOMY");
        assert_eq!(json["budget"], "1500");
        assert_eq!(json["preferred_counties"], json!(["Kerry"]));
        assert_eq!(json["interests"], json!(["Music"]));
        assert_eq!(json["special_requests"], "");
    }

    #[test]
    fn test_unset_budget_is_left_out() {
        let mut trip = create_test_trip();
        trip.apply(TripEdit::Budget(None)).unwrap();

        let json = serde_json::to_value(TripPayload::from(&trip)).unwrap();
        assert!(json.get("budget").is_none());
        assert_eq!(TripPayload::from(&TripRequest::default()).budget, None);
    }

    #[test]
    fn test_chat_payload_omits_missing_travel_data() {
        let history = vec![ConversationTurn::assistant("Here is your trip")];
        let payload = ChatPayload::new("Any pubs?", None, &history);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["message"], "Any pubs?");
        assert!(json.get("travel_data").is_none());
        assert_eq!(json["conversation_history"][0]["role"], "assistant");
        assert_eq!(json["conversation_history"][0]["content"], "Here is your trip");
    }

    #[test]
    fn test_text_itinerary_with_offers() {
        let response: ItineraryResponse = serde_json::from_value(json!({
            "status": "success",
            "itinerary": "Day 1: Dublin",
            "flights": { "data": [
                { "departure": "LHR", "arrival": "DUB", "price": { "total": "89.50", "currency": "GBP" } },
                { "airline": "incomplete" }
            ]},
            "hotels": { "data": { "hotels": [
                { "hotel_name": "The Shelbourne", "review_score": 9.1, "total_price_eur": 1400, "city": "Dublin" }
            ]}},
            "county_dates": { "Dublin": { "start_date": "2025-06-01", "end_date": "2025-06-04" } }
        }))
        .unwrap();

        let result = response.into_result().unwrap();
        assert_eq!(result.narrative, Narrative::Text("Day 1: Dublin".to_string()));

        let flights = result.flight_offers.as_ref().unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].price, Price::new(89.5, "GBP"));

        let hotel = result.best_hotel().unwrap();
        assert_eq!(hotel.name, "The Shelbourne");
        assert_eq!(hotel.price.currency, "EUR");

        assert_eq!(result.region_dates["Dublin"].end, date(2025, 6, 4));
    }

    #[test]
    fn test_day_by_day_itinerary() {
        let response: ItineraryResponse = serde_json::from_value(json!({
            "itinerary": [
                {
                    "day": 1,
                    "date": "2025-06-01",
                    "county": "Dublin",
                    "activities": { "morning": "Book of Kells", "afternoon": "Phoenix Park", "evening": "Trad session" },
                    "hotel": "The Merrion"
                },
                {
                    "date": "2025-06-02T00:00:00",
                    "location": "Kerry",
                    "activities": { "morning": "Ring of Kerry" },
                    "accommodation": { "location": "Killarney", "type": "b&b", "checkIn": "2025-06-02" }
                }
            ]
        }))
        .unwrap();

        let result = response.into_result().unwrap();
        let Narrative::Days(days) = &result.narrative else {
            panic!("expected a structured narrative");
        };
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].lodging.as_ref().unwrap().name, "The Merrion");
        assert_eq!(days[1].day, 2);
        assert_eq!(days[1].region, "Kerry");
        assert_eq!(days[1].date, Some(date(2025, 6, 2)));
        assert_eq!(days[1].lodging.as_ref().unwrap().kind.as_deref(), Some("b&b"));
        assert!(result.flight_offers.is_none());
    }

    #[test]
    fn test_null_activity_slots_keep_the_day() {
        let response: ItineraryResponse = serde_json::from_value(json!({
            "itinerary": [
                {
                    "day": 1,
                    "county": "Dublin",
                    "activities": { "morning": "Trinity College", "afternoon": null, "evening": null }
                },
                { "day": 2, "county": "Wicklow", "activities": null }
            ]
        }))
        .unwrap();

        let result = response.into_result().unwrap();
        let Narrative::Days(days) = &result.narrative else {
            panic!("expected a structured narrative");
        };
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].activities.morning, "Trinity College");
        assert_eq!(days[0].activities.afternoon, "");
        assert_eq!(days[1].activities, Activities::default());
    }

    #[test]
    fn test_malformed_county_dates_are_skipped() {
        let response: ItineraryResponse = serde_json::from_value(json!({
            "itinerary": "Day 1: Dublin",
            "county_dates": {
                "Dublin": { "start_date": "2025-06-01" },
                "Kerry": { "start_date": "2025-06-02", "end_date": "2025-06-05" },
                "Cork": "soon"
            }
        }))
        .unwrap();

        let result = response.into_result().unwrap();
        assert_eq!(result.region_dates.len(), 1);
        assert_eq!(result.region_dates["Kerry"].start, date(2025, 6, 2));
    }

    #[test]
    fn test_missing_or_blank_itinerary_is_empty_result() {
        for body in [json!({ "status": "success" }), json!({ "itinerary": "  " }), json!({ "itinerary": [] })] {
            let response: ItineraryResponse = serde_json::from_value(body).unwrap();
            assert!(matches!(response.into_result(), Err(TravelError::EmptyResult)));
        }
    }
}
