use std::panic::Location;

pub use crate::config::ClientConfig;
pub use crate::http::Client;
pub use crate::logger::{Logger, TracingLogger};
pub use crate::query::{Pagination, QueryAppender, RequestBody};
pub use crate::responses::*;
pub use crate::transport::{ApiKeyTransport, HttpRequest, HttpResponse, ReqwestTransport, Transport};

pub mod config;
pub mod http;
pub mod logger;
pub mod query;
pub mod responses;
pub mod transport;

/// Boxed error returned by [`Transport`] implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("api Key must be informed")]
    MissingApiKey,
    #[error("api Key is not a valid header value: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("HTTP request failed: {0}")]
    Transport(#[source] BoxError),
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound {
        response: Box<Response>,
        location: &'static Location<'static>,
    },
    #[error("{error}")]
    Api {
        #[source]
        error: ApiError,
        response: Box<Response>,
        location: &'static Location<'static>,
    },
    #[error("JSON serialization/deserialization failed: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
        location: &'static Location<'static>,
    },
    #[error("failed to read response body: {source}")]
    Body {
        #[source]
        source: std::io::Error,
        location: &'static Location<'static>,
    },
}

impl ClientError {
    #[track_caller]
    pub(crate) fn not_found(response: Response) -> Self {
        ClientError::NotFound {
            response: Box::new(response),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub(crate) fn api(error: ApiError, response: Response) -> Self {
        ClientError::Api {
            error,
            response: Box::new(response),
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub(crate) fn json(source: serde_json::Error) -> Self {
        ClientError::Json {
            source,
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub(crate) fn body(source: std::io::Error) -> Self {
        ClientError::Body {
            source,
            location: Location::caller(),
        }
    }

    /// True for the 404 sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    /// The decoded server error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The buffered response that accompanied a not-found or API error.
    pub fn response(&self) -> Option<&Response> {
        match self {
            ClientError::NotFound { response, .. } | ClientError::Api { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// Source location where the error was raised, for errors produced while
    /// processing a response or encoding a request body.
    pub fn location(&self) -> Option<&'static Location<'static>> {
        match self {
            ClientError::NotFound { location, .. }
            | ClientError::Api { location, .. }
            | ClientError::Json { location, .. }
            | ClientError::Body { location, .. } => Some(location),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
