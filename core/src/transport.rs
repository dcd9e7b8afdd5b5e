//! The transport capability and its default blocking implementation.
//!
//! # Design
//! `Transport` is the seam between request rendering and the network. The
//! requester only needs "execute this request, give me a status, headers and
//! a readable entity". Connection reuse and pooling belong to the
//! implementation. `UreqTransport` disables ureq's status-code-as-error
//! behavior so 4xx/5xx responses come back as data.

use std::env;
use std::time::Duration;

use ureq::http::{HeaderMap, Response};
use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder, SendBody};

use crate::error::TransportError;
use crate::http::{Body, HttpMethod, HttpRequest, TransportResponse};

/// Executes rendered requests.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<TransportResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<TransportResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Settings for `UreqTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound for a whole exchange. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub max_redirects: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_redirects: 10,
        }
    }
}

impl TransportConfig {
    /// Read `REQUESTER_TIMEOUT_SECS` and `REQUESTER_MAX_REDIRECTS`, keeping
    /// the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timeout = lookup("REQUESTER_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .or(defaults.timeout);
        let max_redirects = lookup("REQUESTER_MAX_REDIRECTS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_redirects);
        Self {
            timeout,
            max_redirects,
        }
    }
}

/// Blocking transport backed by a ureq agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    config: TransportConfig,
}

impl UreqTransport {
    pub fn new(config: &TransportConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .max_redirects(config.max_redirects)
            .build()
            .new_agent();
        Self {
            agent,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

/// Configured from the environment, see `TransportConfig::from_env`.
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&TransportConfig::from_env())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<TransportResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        macro_rules! with_headers {
            ($builder:expr) => {{
                let mut builder = $builder;
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder
            }};
        }

        let result = match (method, body) {
            (HttpMethod::Get, None) => with_headers!(self.agent.get(&url)).call(),
            (HttpMethod::Get, Some(body)) => {
                send_entity(with_headers!(self.agent.get(&url)).force_send_body(), body)
            }
            (HttpMethod::Delete, None) => with_headers!(self.agent.delete(&url)).call(),
            (HttpMethod::Delete, Some(body)) => {
                send_entity(with_headers!(self.agent.delete(&url)).force_send_body(), body)
            }
            (HttpMethod::Post, Some(body)) => send_entity(with_headers!(self.agent.post(&url)), body),
            (HttpMethod::Post, None) => with_headers!(self.agent.post(&url)).send_empty(),
            (HttpMethod::Put, Some(body)) => send_entity(with_headers!(self.agent.put(&url)), body),
            (HttpMethod::Put, None) => with_headers!(self.agent.put(&url)).send_empty(),
            (HttpMethod::Patch, Some(body)) => send_entity(with_headers!(self.agent.patch(&url)), body),
            (HttpMethod::Patch, None) => with_headers!(self.agent.patch(&url)).send_empty(),
        };
        let response = result?;

        let status = response.status().as_u16();
        let headers = header_pairs(response.headers());
        let body = response.into_body().into_reader();

        Ok(TransportResponse {
            status,
            headers,
            body: Box::new(body),
        })
    }
}

/// Send `body` as the entity. Encoded bytes go out with a Content-Length,
/// streams are handed to ureq unread and sent chunked.
fn send_entity(
    builder: RequestBuilder<WithBody>,
    body: Body,
) -> Result<Response<ureq::Body>, ureq::Error> {
    match body {
        Body::Bytes(bytes) => builder.send(&bytes[..]),
        Body::Stream(stream) => builder.send(SendBody::from_owned_reader(stream)),
    }
}

/// Response headers as owned pairs. Values that are not valid UTF-8 are kept
/// with replacement characters.
fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
