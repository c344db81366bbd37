//! Conversation about a generated itinerary.
//!
//! A [`ChatFlow`] is seeded from whichever itinerary is available: the
//! handoff from a planner submission first, then the session store. Without
//! either it stays in [`ChatState::NoItinerary`] and refuses to send.
//!
//! Each [`ChatFlow::send`] makes exactly one chat request. The user's turn
//! is appended as soon as it is accepted; the assistant's turn is appended
//! when the request finishes. Failures never surface raw errors in the
//! transcript, they become [`CHAT_APOLOGY`].

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use log::{debug, warn};
use tokio::time;

use crate::{
    backend::TravelBackend,
    error::{Result, TravelError, CHAT_APOLOGY},
    models::{ConversationTurn, ItineraryResult, TripRequest},
    planner::ChatHandoff,
    store::ResultStore,
    wire::ChatPayload,
};

/// Default bound on a single chat request.
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(120);

/// Where the chat view is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Sending,
    /// Nothing to chat about; terminal
    NoItinerary,
}

struct ChatInner {
    state: ChatState,
    transcript: Vec<ConversationTurn>,
}

/// Chat view for one itinerary.
pub struct ChatFlow {
    backend: Arc<dyn TravelBackend>,
    chat_timeout: Duration,
    itinerary: Option<ItineraryResult>,
    trip: Option<TripRequest>,
    inner: Mutex<ChatInner>,
}

/// Opening assistant turn for a freshly seeded chat.
pub fn opening_turn(result: &ItineraryResult) -> ConversationTurn {
    ConversationTurn::assistant(format!(
        "I've generated an itinerary for your trip to Ireland. Here's what I've planned:\n\n{}",
        result.narrative
    ))
}

impl ChatFlow {
    /// Seeds a chat from the handoff, falling back to the store.
    ///
    /// A handoff or stored result with an empty narrative counts as absent.
    ///
    /// # Errors
    ///
    /// Returns `TravelError::Storage` if the store cannot be read.
    pub async fn seed(
        backend: Arc<dyn TravelBackend>,
        handoff: Option<ChatHandoff>,
        store: &ResultStore,
    ) -> Result<Self> {
        let (itinerary, trip) = match handoff.filter(|h| h.result.is_valid()) {
            Some(handoff) => {
                debug!("Seeding chat from planner handoff");
                (Some(handoff.result), handoff.request)
            }
            None => {
                let stored = store.get().await?.filter(ItineraryResult::is_valid);
                if stored.is_some() {
                    debug!("Seeding chat from session store");
                }
                (stored, None)
            }
        };
        Ok(Self::from_parts(backend, itinerary, trip))
    }

    fn from_parts(
        backend: Arc<dyn TravelBackend>,
        itinerary: Option<ItineraryResult>,
        trip: Option<TripRequest>,
    ) -> Self {
        let (state, transcript) = match &itinerary {
            Some(result) => (ChatState::Idle, vec![opening_turn(result)]),
            None => (ChatState::NoItinerary, Vec::new()),
        };
        Self {
            backend,
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
            itinerary,
            trip,
            inner: Mutex::new(ChatInner { state, transcript }),
        }
    }

    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    pub fn state(&self) -> ChatState {
        self.lock().state
    }

    /// Copy of the transcript, oldest turn first.
    pub fn transcript(&self) -> Vec<ConversationTurn> {
        self.lock().transcript.clone()
    }

    /// The itinerary this chat is about.
    pub fn itinerary(&self) -> Option<&ItineraryResult> {
        self.itinerary.as_ref()
    }

    /// The request that produced the itinerary, when the planner handed it
    /// over.
    pub fn trip(&self) -> Option<&TripRequest> {
        self.trip.as_ref()
    }

    /// Sends one message and returns the assistant's turn.
    ///
    /// A failed request still yields a turn (the apology); only requests
    /// that are refused up front return an error.
    ///
    /// # Errors
    ///
    /// - `NoItinerary` if the chat was seeded without an itinerary
    /// - `Busy` if another message is in flight (no call, no turn)
    /// - `Validation` if `text` is blank (no call, no turn)
    pub async fn send(&self, text: &str) -> Result<ConversationTurn> {
        let message = text.trim();
        let history = {
            let mut inner = self.lock();
            match inner.state {
                ChatState::NoItinerary => return Err(TravelError::NoItinerary),
                ChatState::Sending => return Err(TravelError::Busy { operation: "chat" }),
                ChatState::Idle => {}
            }
            if message.is_empty() {
                return Err(TravelError::validation("message").with_reason("must not be blank"));
            }
            let history = inner.transcript.clone();
            inner.transcript.push(ConversationTurn::user(message));
            inner.state = ChatState::Sending;
            history
        };

        let mut guard = SendGuard {
            flow: self,
            armed: true,
        };
        let payload = ChatPayload::new(message, self.trip.as_ref(), &history);
        let reply = match self.exchange(&payload).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Chat message failed: {e}");
                CHAT_APOLOGY.to_string()
            }
        };
        guard.armed = false;
        drop(guard);

        let turn = ConversationTurn::assistant(reply);
        let mut inner = self.lock();
        inner.transcript.push(turn.clone());
        inner.state = ChatState::Idle;
        Ok(turn)
    }

    async fn exchange(&self, payload: &ChatPayload) -> Result<String> {
        let reply = time::timeout(self.chat_timeout, self.backend.chat(payload))
            .await
            .map_err(|_| TravelError::ChatSend {
                message: format!("no reply after {}s", self.chat_timeout.as_secs()),
            })?
            .map_err(|e| TravelError::ChatSend {
                message: e.to_string(),
            })?;

        if reply.response.trim().is_empty() {
            return Err(TravelError::ChatSend {
                message: "empty response".to_string(),
            });
        }
        Ok(reply.response)
    }

    fn lock(&self) -> MutexGuard<'_, ChatInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the chat to `Idle` if a send future is dropped mid-flight. The
/// user turn stays in the transcript.
struct SendGuard<'a> {
    flow: &'a ChatFlow,
    armed: bool,
}

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.flow.lock();
        if inner.state == ChatState::Sending {
            warn!("Chat message abandoned before a reply arrived");
            inner.state = ChatState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        models::Narrative,
        wire::{ChatReply, HealthStatus, ItineraryResponse, TripPayload},
    };

    struct EchoBackend;

    #[async_trait::async_trait]
    impl TravelBackend for EchoBackend {
        async fn generate_itinerary(&self, _trip: &TripPayload) -> Result<ItineraryResponse> {
            unreachable!("chat never generates itineraries")
        }

        async fn chat(&self, payload: &ChatPayload) -> Result<ChatReply> {
            Ok(ChatReply {
                response: format!("echo: {}", payload.message),
                ..Default::default()
            })
        }

        async fn health(&self) -> Result<HealthStatus> {
            unreachable!("chat never checks health")
        }
    }

    fn seeded(itinerary: Option<ItineraryResult>) -> ChatFlow {
        ChatFlow::from_parts(Arc::new(EchoBackend), itinerary, None)
    }

    #[test]
    fn test_opening_turn_embeds_narrative() {
        let result = ItineraryResult::new(Narrative::Text("Day 1: Dublin".to_string()));
        let turn = opening_turn(&result);
        assert_eq!(
            turn.text,
            "I've generated an itinerary for your trip to Ireland. Here's what I've planned:\n\nDay 1: Dublin"
        );
    }

    #[tokio::test]
    async fn test_send_appends_user_then_assistant() {
        let flow = seeded(Some(ItineraryResult::new(Narrative::Text(
            "Day 1: Cork".to_string(),
        ))));

        let turn = flow.send("  Where should I eat?  ").await.unwrap();
        assert_eq!(turn.text, "echo: Where should I eat?");

        let transcript = flow.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1], ConversationTurn::user("Where should I eat?"));
        assert_eq!(flow.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let flow = seeded(Some(ItineraryResult::new(Narrative::Text(
            "Day 1: Cork".to_string(),
        ))));

        let err = flow.send("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(flow.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_without_itinerary_nothing_is_sent() {
        let flow = seeded(None);
        assert_eq!(flow.state(), ChatState::NoItinerary);
        assert!(flow.transcript().is_empty());

        let err = flow.send("hello").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoItinerary);
        assert!(flow.transcript().is_empty());
    }
}
