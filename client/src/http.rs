use crate::{ClientError, LookupResult, Result};
use std::{collections::HashMap, fmt, time::Duration};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

pub const USER_AGENT: &str = "marketcall-blacklisted-client/1.0";
pub const ACCEPT: &str = "application/json";

/// Carries the request to the service and hands back the raw answer.
///
/// Implementations report any failure to complete the round trip, including
/// non-2xx answers, as [`ClientError::Transport`].
pub trait HttpClient: Send + Sync {
    fn request(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::GET => f.write_str("GET"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Blocking transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self { inner })
    }

    pub fn from_reqwest(inner: reqwest::blocking::Client) -> Self {
        Self { inner }
    }
}

impl HttpClient for ReqwestClient {
    fn request(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| ClientError::Transport {
                    message: format!("invalid header name {}: {}", name, err),
                    code: None,
                })?;
            let value = HeaderValue::from_str(value).map_err(|err| ClientError::Transport {
                message: format!("invalid header value for {}: {}", name.as_str(), err),
                code: None,
            })?;
            headers.insert(name, value);
        }

        let builder = match request.method {
            HttpMethod::GET => self.inner.get(&request.url),
        };

        let response = builder
            .headers(headers)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// The URL carries the API key, so it is stripped from the message.
fn transport_error(err: reqwest::Error) -> ClientError {
    let err = err.without_url();
    ClientError::Transport {
        code: err.status().map(|status| status.as_u16()),
        message: err.to_string(),
    }
}

/// How the API key and phone number are placed into the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathEncoding {
    /// Inserted as given. This is what the service has always received.
    #[default]
    Verbatim,
    /// Percent-encoded as path segments.
    Percent,
}

impl PathEncoding {
    fn apply<'a>(&self, segment: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            PathEncoding::Verbatim => std::borrow::Cow::Borrowed(segment),
            PathEncoding::Percent => urlencoding::encode(segment),
        }
    }
}

pub struct Client<T: HttpClient = ReqwestClient> {
    endpoint: String,
    api_key: String,
    transport: T,
    path_encoding: PathEncoding,
}

impl Client<ReqwestClient> {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: HttpClient> Client<T> {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, transport: T) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            transport,
            path_encoding: PathEncoding::default(),
        }
    }

    pub fn with_path_encoding(mut self, path_encoding: PathEncoding) -> Self {
        self.path_encoding = path_encoding;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Look up a phone number. The number is sent as given; the service
    /// decides whether it is valid.
    pub fn lookup(&self, phone: &str) -> Result<LookupResult> {
        let path = self.lookup_path(phone);
        tracing::debug!(endpoint = %self.endpoint, "sending lookup request");

        let response = self.transport.request(HttpRequest {
            method: HttpMethod::GET,
            url: format!("{}{}", self.endpoint, path),
            headers: default_headers(),
        })?;

        tracing::debug!(status = response.status, bytes = response.body.len(), "lookup response");
        LookupResult::from_body(&response.body)
    }

    pub fn lookup_path(&self, phone: &str) -> String {
        format!(
            "/standard/api/v1/Lookup/key/{}/phone/{}/response/json",
            self.path_encoding.apply(&self.api_key),
            self.path_encoding.apply(phone)
        )
    }
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        ("User-Agent".to_string(), USER_AGENT.to_string()),
        ("Accept".to_string(), ACCEPT.to_string()),
    ])
}

impl<T: HttpClient> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("path_encoding", &self.path_encoding)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    path_encoding: PathEncoding,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Total time allowed per request. Only applies to the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn path_encoding(mut self, path_encoding: PathEncoding) -> Self {
        self.path_encoding = path_encoding;
        self
    }

    pub fn build(self) -> Result<Client<ReqwestClient>> {
        let transport = match self.timeout {
            Some(timeout) => ReqwestClient::with_timeout(timeout)?,
            None => ReqwestClient::new(),
        };
        self.build_with(transport)
    }

    pub fn build_with<T: HttpClient>(self, transport: T) -> Result<Client<T>> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| ClientError::Config("endpoint is required".to_string()))?;
        let url = url::Url::parse(&endpoint)
            .map_err(|err| ClientError::Config(format!("invalid endpoint {}: {}", endpoint, err)))?;
        if url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "endpoint {} cannot be used as a base URL",
                endpoint
            )));
        }

        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ClientError::Config("api key is required".to_string()))?;

        Ok(Client::new(endpoint, api_key, transport).with_path_encoding(self.path_encoding))
    }
}
