use std::fmt::{self, Display};

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

pub const NOT_FOUND_MESSAGE: &str = "Nothing was found";

/// Error payload returned by the API for non-2xx statuses. Missing fields
/// decode as empty/zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
}

impl Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)
    }
}

impl std::error::Error for ApiError {}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_json() {
        let err: ApiError = serde_json::from_str(r#"{"message":"boom","code":42}"#).unwrap();
        assert_eq!(
            err,
            ApiError {
                message: "boom".to_string(),
                code: 42
            }
        );
        assert_eq!(format!("{}", err), "boom (code: 42)");
    }

    #[test]
    fn test_api_error_partial_body() {
        let err: ApiError = serde_json::from_str(r#"{"message":"Workspace archived"}"#).unwrap();
        assert_eq!(err.message, "Workspace archived");
        assert_eq!(err.code, 0);

        let empty: ApiError = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ApiError::default());
    }
}
