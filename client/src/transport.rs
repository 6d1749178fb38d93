//! Transport layer: the request/response types that cross it, the
//! [`Transport`] trait, the platform transport backed by `reqwest`, and the
//! decorator that stamps the API key on every request.

use crate::BoxError;
use std::{fmt, io::Read};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use url::Url;

pub static HEADER_API_KEY: &str = "X-Api-Key";

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A response whose body has not been read yet. Dropping `body` closes it.
pub struct HttpResponse {
    pub status: StatusCode,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

pub trait Transport: Send + Sync {
    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).round_trip(request)
    }
}

/// Sets `X-Api-Key` on each request, then hands it to `next` untouched.
pub struct ApiKeyTransport {
    api_key: HeaderValue,
    next: Box<dyn Transport>,
}

impl ApiKeyTransport {
    pub fn new(api_key: HeaderValue, next: Box<dyn Transport>) -> Self {
        let mut api_key = api_key;
        api_key.set_sensitive(true);
        Self { api_key, next }
    }
}

impl fmt::Debug for ApiKeyTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyTransport")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl Transport for ApiKeyTransport {
    fn round_trip(&self, mut request: HttpRequest) -> Result<HttpResponse, BoxError> {
        request
            .headers
            .insert(HEADER_API_KEY, self.api_key.clone());
        self.next.round_trip(request)
    }
}

/// Platform transport over `reqwest`'s blocking client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client, e.g. one with timeouts set.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        Ok(HttpResponse {
            status: response.status(),
            url: response.url().clone(),
            headers: response.headers().clone(),
            body: Box::new(response),
        })
    }
}
