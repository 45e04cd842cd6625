use crate::error::RequestError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

pub const AIRTABLE_API_BASE: &str = "https://api.airtable.com/v0/";

/// Method, optional JSON body and extra headers for one call.
/// Extra headers replace the defaults of the same name.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::GET, body: None, headers: HeaderMap::new() }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self { method: Method::POST, body: Some(body), ..Self::default() }
    }

    pub fn delete() -> Self {
        Self { method: Method::DELETE, ..Self::default() }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Described { message: Option<String> },
    Code(String),
}

/// Picks the service's `error.message` out of a failed response body, or falls back to the status line.
pub fn error_from_body(status: u16, body: &[u8]) -> RequestError {
    let message = serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| match envelope.error? {
            ErrorDetail::Described { message } => message,
            ErrorDetail::Code(_) => None,
        })
        .filter(|m| !m.is_empty());
    match message {
        Some(message) => RequestError::new(Some(status), message),
        None => RequestError::generic(status),
    }
}

#[derive(Clone)]
pub struct ApiClient {
    pub http: HttpClient,
    token: String,
}

impl ApiClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_http(HttpClient::new(), token)
    }

    pub fn with_http(http: HttpClient, token: impl Into<String>) -> Self {
        Self { http, token: token.into() }
    }

    fn default_headers(&self) -> Result<HeaderMap, RequestError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| RequestError::new(None, "The API token contains invalid characters"))?;
        bearer.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Sends one request with bearer auth and a JSON content type.
    /// Returns `None` for 204 No Content and the parsed JSON body for any other success.
    pub async fn request(&self, url: Url, options: RequestOptions) -> Result<Option<Value>, RequestError> {
        let result = self.send(url.clone(), options).await;
        if let Err(e) = &result {
            log::error!("API request to {} failed: {}", url, e);
        }
        result
    }

    async fn send(&self, url: Url, options: RequestOptions) -> Result<Option<Value>, RequestError> {
        let mut headers = self.default_headers()?;
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        log::debug!("{} {}", options.method, url);
        let mut req = self.http.request(options.method, url).headers(headers);
        if let Some(body) = &options.body {
            let bytes = serde_json::to_vec(body).map_err(|e| RequestError::new(None, e.to_string()))?;
            req = req.body(bytes);
        }

        let resp = req.send().await.map_err(RequestError::transport)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &body));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        resp.json::<Value>().await.map(Some).map_err(RequestError::transport)
    }
}
