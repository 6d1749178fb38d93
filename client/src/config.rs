use crate::{logger::TracingLogger, Client, Result};
use std::{fmt, sync::Arc};

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.clockify.me/api/v1";

/// Settings needed to build a [`Client`]. Reading them from files or the
/// environment is left to the caller.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    /// Forward request/response dumps to `tracing`.
    #[serde(default)]
    pub debug: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("debug", &self.debug)
            .finish()
    }
}

impl ClientConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: api_key.into(),
            debug: false,
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn build(&self) -> Result<Client> {
        let client = Client::new(&self.base_url, &self.api_key)?;
        if self.debug {
            return Ok(client.with_logger(Arc::new(TracingLogger)));
        }
        Ok(client)
    }
}
