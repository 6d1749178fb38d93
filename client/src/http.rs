use crate::{
    logger::Logger,
    query::RequestBody,
    transport::{ApiKeyTransport, HttpRequest, ReqwestTransport, Transport},
    ApiError, ClientError, Response, Result,
};
use std::{fmt, io::Read, sync::Arc};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{instrument, Span};
use url::Url;

static MIME_JSON: &str = "application/json";

/// Blocking JSON client for an API that authenticates with a static key.
///
/// Requests are built with [`Client::new_request`] / [`Client::new_request_with`]
/// and sent with [`Client::execute`] / [`Client::execute_into`].
pub struct Client {
    base_url: Url,
    transport: Box<dyn Transport>,
    logger: Option<Arc<dyn Logger>>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Client over the default `reqwest` transport. No I/O happens here.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_transport(base_url, api_key, ReqwestTransport::new())
    }

    /// Client whose API-key decorator wraps `transport` instead of the default.
    pub fn with_transport<T>(base_url: &str, api_key: &str, transport: T) -> Result<Self>
    where
        T: Transport + 'static,
    {
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }
        let api_key = HeaderValue::from_str(api_key)?;
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            base_url,
            transport: Box::new(ApiKeyTransport::new(api_key, Box::new(transport))),
            logger: None,
        })
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn logf(&self, args: fmt::Arguments<'_>) {
        if let Some(logger) = &self.logger {
            logger.log(args);
        }
    }

    /// Builds a request without a body.
    pub fn new_request(&self, method: Method, path: &str) -> Result<HttpRequest> {
        self.build_request::<serde_json::Value>(method, path, None)
    }

    /// Builds a request carrying `body`.
    ///
    /// If `body` exposes a [`QueryAppender`](crate::QueryAppender) it is
    /// applied to the URL for every method. The body is JSON-encoded unless
    /// the method is `GET`, in which case it is dropped.
    pub fn new_request_with<B>(&self, method: Method, path: &str, body: &B) -> Result<HttpRequest>
    where
        B: RequestBody + ?Sized,
    {
        self.build_request(method, path, Some(body))
    }

    fn build_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<HttpRequest>
    where
        B: RequestBody + ?Sized,
    {
        let joined = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = self.base_url.join(&joined)?;

        if let Some(appender) = body.and_then(|b| b.query_appender()) {
            appender.append_to_query(&mut url);
        }

        let body = if method == Method::GET { None } else { body };

        let buf = match body {
            Some(body) => {
                let buf = serde_json::to_vec(body).map_err(|e| ClientError::json(e))?;
                self.logf(format_args!(
                    "request body: {}",
                    String::from_utf8_lossy(&buf)
                ));
                Some(buf)
            }
            None => None,
        };

        let mut headers = HeaderMap::new();
        if buf.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(MIME_JSON));
        }
        headers.insert(ACCEPT, HeaderValue::from_static(MIME_JSON));

        Ok(HttpRequest {
            method,
            url,
            headers,
            body: buf,
        })
    }

    /// Sends `request`, discarding any success payload.
    pub fn execute(&self, request: HttpRequest) -> Result<Response> {
        self.process::<serde_json::Value>(request, None)
    }

    /// Sends `request` and decodes a non-empty success payload into `into`.
    ///
    /// `into` is only written after a successful decode.
    pub fn execute_into<T>(&self, request: HttpRequest, into: &mut T) -> Result<Response>
    where
        T: DeserializeOwned,
    {
        self.process(request, Some(into))
    }

    #[instrument(
        name = "api_request",
        skip(self, request, into),
        fields(
            http.method = %request.method,
            http.url = %request.url,
            http.status_code = tracing::field::Empty,
        )
    )]
    fn process<T>(&self, request: HttpRequest, into: Option<&mut T>) -> Result<Response>
    where
        T: DeserializeOwned,
    {
        let request_url = request.url.clone();
        let response = self
            .transport
            .round_trip(request)
            .map_err(ClientError::Transport)?;

        let mut reader = response.body;
        let mut body = Vec::new();
        let read = reader.read_to_end(&mut body);
        drop(reader);
        read.map_err(|e| ClientError::body(e))?;

        let response = Response {
            status: response.status,
            url: response.url,
            headers: response.headers,
            body,
        };
        let status = response.status.as_u16();
        Span::current().record("http.status_code", status);

        self.logf(format_args!(
            "url: {}, status: {}, body: \"{}\"",
            request_url,
            status,
            String::from_utf8_lossy(&response.body)
        ));

        if status == 404 {
            return Err(ClientError::not_found(response));
        }

        if status < 200 || status > 300 {
            let error = serde_json::from_slice::<ApiError>(&response.body)
                .map_err(|e| ClientError::json(e))?;
            return Err(ClientError::api(error, response));
        }

        let into = match into {
            Some(into) if !response.body.is_empty() => into,
            _ => return Ok(response),
        };

        *into = serde_json::from_slice(&response.body).map_err(|e| ClientError::json(e))?;
        Ok(response)
    }
}
