//! Builder for creating and configuring TravelClient instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::debug;

use super::TravelClient;
use crate::{
    backend::{http::DEFAULT_BASE_URL, HttpBackend, TravelBackend},
    chat::DEFAULT_CHAT_TIMEOUT,
    error::{Result, TravelError},
    planner::DEFAULT_SUBMIT_TIMEOUT,
    store::ResultStore,
};

/// Builder for creating and configuring TravelClient instances.
#[derive(Clone, Default)]
pub struct TravelClientBuilder {
    base_url: Option<String>,
    store_path: Option<PathBuf>,
    backend: Option<Arc<dyn TravelBackend>>,
    submit_timeout: Option<Duration>,
    chat_timeout: Option<Duration>,
}

impl TravelClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the itinerary service base URL. Defaults to
    /// `http://localhost:8000`.
    pub fn with_base_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        if let Some(url) = url {
            self.base_url = Some(url.into());
        }
        self
    }

    /// Sets a custom session store path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/wayfarer/session.db` or
    /// `~/.local/share/wayfarer/session.db`
    pub fn with_store_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.store_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses `backend` instead of the HTTP backend. The base URL is ignored.
    pub fn with_backend(mut self, backend: Arc<dyn TravelBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_submit_timeout(mut self, timeout: Option<Duration>) -> Self {
        if timeout.is_some() {
            self.submit_timeout = timeout;
        }
        self
    }

    pub fn with_chat_timeout(mut self, timeout: Option<Duration>) -> Self {
        if timeout.is_some() {
            self.chat_timeout = timeout;
        }
        self
    }

    /// Builds the configured client.
    ///
    /// # Errors
    ///
    /// Returns `TravelError::Configuration` for a zero timeout or a base URL
    /// that is not http(s), `TravelError::XdgDirectory` or
    /// `TravelError::FileSystem` if the store location is unusable, and
    /// `TravelError::Storage` if the store cannot be initialized.
    pub async fn build(self) -> Result<TravelClient> {
        let submit_timeout = Self::checked_timeout(
            "submit timeout",
            self.submit_timeout.unwrap_or(DEFAULT_SUBMIT_TIMEOUT),
        )?;
        let chat_timeout = Self::checked_timeout(
            "chat timeout",
            self.chat_timeout.unwrap_or(DEFAULT_CHAT_TIMEOUT),
        )?;

        let backend = match self.backend {
            Some(backend) => backend,
            None => {
                let base_url = self
                    .base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                    return Err(TravelError::Configuration {
                        message: format!("Base URL must start with http:// or https://: {base_url}"),
                    });
                }
                debug!("Using itinerary service at {base_url}");
                Arc::new(HttpBackend::new(base_url))
            }
        };

        let store_path = match self.store_path {
            Some(path) => path,
            None => Self::default_store_path()?,
        };
        let store = ResultStore::open(&store_path).await?;

        Ok(TravelClient::new(backend, store, submit_timeout, chat_timeout))
    }

    fn checked_timeout(name: &str, timeout: Duration) -> Result<Duration> {
        if timeout.is_zero() {
            return Err(TravelError::Configuration {
                message: format!("{name} must be greater than zero"),
            });
        }
        Ok(timeout)
    }

    /// Returns the default store path following XDG Base Directory
    /// specification.
    fn default_store_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("wayfarer")
            .place_data_file("session.db")
            .map_err(|e| TravelError::XdgDirectory(e.to_string()))
    }
}
