#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use jiff::civil::date;
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::Notify;
use wayfarer_core::{
    wire::{ChatPayload, ChatReply, HealthStatus, ItineraryResponse, TripPayload},
    ResultStore, TravelBackend, TravelError, TripEdit, TripRequest,
};

/// Backend that replays scripted answers and records what it was sent.
///
/// When a gate is set, every call waits for the gate to be notified before
/// answering, which keeps a request in flight for as long as a test needs.
#[derive(Default)]
pub struct ScriptedBackend {
    itineraries: Mutex<VecDeque<wayfarer_core::Result<ItineraryResponse>>>,
    replies: Mutex<VecDeque<wayfarer_core::Result<ChatReply>>>,
    pub trips: Mutex<Vec<TripPayload>>,
    pub chats: Mutex<Vec<ChatPayload>>,
    pub itinerary_calls: AtomicUsize,
    pub chat_calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_itinerary(self, response: wayfarer_core::Result<ItineraryResponse>) -> Self {
        self.itineraries.lock().unwrap().push_back(response);
        self
    }

    pub fn with_reply(self, reply: wayfarer_core::Result<ChatReply>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn itinerary_calls(&self) -> usize {
        self.itinerary_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl TravelBackend for ScriptedBackend {
    async fn generate_itinerary(&self, trip: &TripPayload) -> wayfarer_core::Result<ItineraryResponse> {
        self.itinerary_calls.fetch_add(1, Ordering::SeqCst);
        self.trips.lock().unwrap().push(trip.clone());
        self.wait_for_gate().await;
        self.itineraries
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TravelError::transport("no scripted itinerary")))
    }

    async fn chat(&self, payload: &ChatPayload) -> wayfarer_core::Result<ChatReply> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.chats.lock().unwrap().push(payload.clone());
        self.wait_for_gate().await;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TravelError::transport("no scripted reply")))
    }

    async fn health(&self) -> wayfarer_core::Result<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
        })
    }
}

/// Helper function to create a store in a fresh temporary directory
pub async fn create_test_store() -> (TempDir, ResultStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = ResultStore::open(temp_dir.path().join("session.db"))
        .await
        .expect("Failed to open store");
    (temp_dir, store)
}

/// A request that passes validation
pub fn valid_trip() -> TripRequest {
    let mut trip = TripRequest::default();
    for edit in [
        TripEdit::Origin("LHR".to_string()),
        TripEdit::ArrivalDate(Some(date(2025, 6, 1))),
        TripEdit::DepartureDate(Some(date(2025, 6, 8))),
        TripEdit::Adults(2),
        TripEdit::Budget(Some(2000)),
        TripEdit::AddInterest("History".to_string()),
        TripEdit::AddRegion("Dublin".to_string()),
    ] {
        trip.apply(edit).expect("edit should apply");
    }
    trip
}

pub fn text_itinerary(text: &str) -> ItineraryResponse {
    serde_json::from_value(json!({ "status": "success", "itinerary": text }))
        .expect("valid itinerary response")
}

pub fn day_itinerary() -> ItineraryResponse {
    serde_json::from_value(json!({
        "status": "success",
        "itinerary": { "daily_itinerary": [
            {
                "day": 1,
                "date": "2025-06-01",
                "county": "Dublin",
                "activities": { "morning": "Trinity College", "afternoon": "Dublin Castle", "evening": "Temple Bar" },
                "accommodation": "The Westbury"
            },
            {
                "day": 2,
                "date": "2025-06-02",
                "county": "Wicklow",
                "activities": { "morning": "Glendalough", "afternoon": "Powerscourt", "evening": "Enniskerry" },
                "accommodation": { "location": "Glendalough Hotel", "type": "hotel" }
            }
        ]},
        "flights": { "data": [
            { "departure": "LHR", "arrival": "DUB", "price": { "total": "110.00", "currency": "EUR" }, "airline": "Aer Lingus" }
        ]},
        "hotels": { "data": [
            { "name": "The Westbury", "rating": 9.0, "price": { "amount": 380, "currency": "EUR" }, "city": "Dublin" }
        ]}
    }))
    .expect("valid itinerary response")
}

pub fn reply(text: &str) -> ChatReply {
    ChatReply {
        response: text.to_string(),
        ..Default::default()
    }
}
