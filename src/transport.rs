//! Outbound HTTP transport.
//!
//! The SDK talks to the network through the minimal [`Transport`] contract:
//! send one request descriptor, get back a status, headers and body. No
//! implicit retries, no implicit auth - those belong to the dispatcher.
//! The default implementation is [`HttpTransport`], built on reqwest.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{Error, Result};

/// An outbound request descriptor.
///
/// The body is held as plain bytes so the dispatcher can re-send the same
/// descriptor after a token refresh.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: reqwest::Method,
    /// Absolute request URL.
    pub url: String,
    /// Request headers as name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<Vec<u8>>,
}

impl OutgoingRequest {
    /// Create a GET request for the given URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: reqwest::Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a POST request for the given URL.
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: reqwest::Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Replace a header in place, appending it if not present. Matching is
    /// case-insensitive.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        for (existing, v) in &mut self.headers {
            if existing.eq_ignore_ascii_case(name) {
                *v = value;
                return;
            }
        }
        self.headers.push((name.to_string(), value));
    }
}

/// A transport-level response: status, headers and raw body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers as name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The response body as text (lossy for non-UTF-8 bodies).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// The outbound HTTP contract consumed by token acquisition and the
/// authorized dispatcher.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response. Any status code is a
    /// successful send; only transport-level failures are errors.
    async fn send(&self, request: &OutgoingRequest) -> Result<TransportResponse>;
}

/// Default [`Transport`] built on a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default client configuration.
    pub fn new() -> Result<Self> {
        Self::with_proxy(None)
    }

    /// Create a transport that routes requests through the given proxy.
    pub fn with_proxy(proxy: Option<reqwest::Proxy>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("paxful-rs/{} (Rust)", env!("CARGO_PKG_VERSION")));
        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Config(format!("invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::Config(format!("invalid value for header {name}")))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutgoingRequest) -> Result<TransportResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(Self::header_map(&request.headers)?);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording transport stub for unit tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// A [`Transport`] that replays a programmed queue of responses and
    /// records every request it sees.
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        responses: Mutex<VecDeque<TransportResponse>>,
        requests: Mutex<Vec<OutgoingRequest>>,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Queue a response; responses are consumed in FIFO order and the
        /// last one repeats once the queue drains.
        pub(crate) fn push_response(&self, status: u16, body: serde_json::Value) -> &Self {
            self.responses.lock().unwrap().push_back(TransportResponse {
                status,
                headers: vec![],
                body: serde_json::to_vec(&body).unwrap(),
            });
            self
        }

        pub(crate) fn requests(&self) -> Vec<OutgoingRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: &OutgoingRequest) -> Result<TransportResponse> {
            self.requests.lock().unwrap().push(request.clone());
            let mut responses = self.responses.lock().unwrap();
            let response = if responses.len() > 1 {
                responses.pop_front().unwrap()
            } else {
                responses
                    .front()
                    .cloned()
                    .expect("RecordingTransport has no programmed response")
            };
            Ok(response)
        }
    }

    /// Find a header value on a recorded request, case-insensitively.
    pub(crate) fn header<'a>(request: &'a OutgoingRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut request = OutgoingRequest::get("https://api.paxful.com/x")
            .header("Authorization", "Bearer old");
        request.set_header("authorization", "Bearer new");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers[0].1, "Bearer new");
    }

    #[test]
    fn test_set_header_appends_when_absent() {
        let mut request = OutgoingRequest::post("https://api.paxful.com/x");
        request.set_header("Authorization", "Bearer token");
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_response_helpers() {
        let response = TransportResponse {
            status: 200,
            headers: vec![],
            body: br#"{"ok":true}"#.to_vec(),
        };
        assert!(response.is_success());
        assert_eq!(response.text(), r#"{"ok":true}"#);

        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_non_success_statuses() {
        for status in [199, 301, 401, 500] {
            let response = TransportResponse {
                status,
                headers: vec![],
                body: vec![],
            };
            assert!(!response.is_success(), "{status} should not be a success");
        }
    }
}
