//! Error types for the travel client library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fixed reply shown in the transcript when a chat turn fails.
pub const CHAT_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Message shown when itinerary generation exceeds its time bound.
pub const TIMEOUT_NOTICE: &str = "Request timed out. The itinerary generation is taking longer than expected. Please try again.";

/// Coarse classification of a [`TravelError`], used by the flows to record
/// why they failed without holding on to the error itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or incomplete trip request, caught before any network call
    Validation,
    /// The request exceeded its time bound, or the gateway reported 504
    Timeout,
    /// Network failure or non-success status
    Transport,
    /// Success status without a usable itinerary narrative
    EmptyResult,
    /// Any failure during a chat turn
    ChatSend,
    /// A request of the same flow is already in flight
    Busy,
    /// The chat view has no itinerary to talk about
    NoItinerary,
    /// Session storage could not be read or written
    Storage,
    /// Client configuration is unusable
    Configuration,
}

/// Comprehensive error type for all travel client operations.
#[derive(Error, Debug)]
pub enum TravelError {
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// The request was abandoned because it ran out of time
    #[error("Request timed out: {message}")]
    Timeout { message: String },
    /// Network failures and non-success HTTP statuses
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },
    /// The service answered successfully but produced no itinerary
    #[error("The itinerary service returned no itinerary")]
    EmptyResult,
    /// A chat turn failed; never shown raw to the user
    #[error("Chat message could not be delivered: {message}")]
    ChatSend { message: String },
    /// A second submit/send arrived while one is outstanding
    #[error("A {operation} request is already in flight")]
    Busy { operation: &'static str },
    /// Chat was attempted without an itinerary
    #[error("No itinerary found. Please generate an itinerary first.")]
    NoItinerary,
    /// Session store errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating storage errors with optional context.
pub struct StorageErrorBuilder {
    message: String,
}

impl StorageErrorBuilder {
    /// Create a new storage error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TravelError {
        TravelError::Storage {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct ValidationBuilder {
    field: String,
}

impl ValidationBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TravelError {
        TravelError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TravelError {
    /// Creates a builder for storage errors.
    pub fn storage(message: impl Into<String>) -> StorageErrorBuilder {
        StorageErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationBuilder {
        ValidationBuilder::new(field)
    }

    /// Transport error without an HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
        }
    }

    /// Timeout error with a short description of what ran out of time.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::EmptyResult => ErrorKind::EmptyResult,
            Self::ChatSend { .. } => ErrorKind::ChatSend,
            Self::Busy { .. } => ErrorKind::Busy,
            Self::NoItinerary => ErrorKind::NoItinerary,
            Self::Storage { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. } => ErrorKind::Storage,
            Self::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    /// Message suitable for showing to the person at the keyboard.
    ///
    /// Timeouts use a fixed notice, chat failures collapse into the fixed
    /// apology, and everything else falls back to the error's own text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout { .. } => TIMEOUT_NOTICE.to_string(),
            Self::Transport {
                status: Some(status),
                ..
            } => format!("Failed to generate itinerary: HTTP {status}"),
            Self::EmptyResult => "No itinerary was generated. Please try again.".to_string(),
            Self::ChatSend { .. } => CHAT_APOLOGY.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Transport => "transport",
            ErrorKind::EmptyResult => "empty result",
            ErrorKind::ChatSend => "chat send",
            ErrorKind::Busy => "busy",
            ErrorKind::NoItinerary => "no itinerary",
            ErrorKind::Storage => "storage",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

/// Extension trait for mapping rusqlite Results into storage errors.
pub trait StoreResultExt<T> {
    /// Map storage errors with a message.
    fn store_context(self, message: &str) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn store_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TravelError::storage(message).with_source(e))
    }
}

/// Result type alias for travel client operations
pub type Result<T> = std::result::Result<T, TravelError>;
