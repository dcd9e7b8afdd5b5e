//! HTTP request and response types exchanged with a `Transport`.
//!
//! # Design
//! `HttpRequest` is the rendered form of a `RequesterState`: one absolute URL
//! (query string included), the final header list and an optional entity.
//! `HttpResponse` is what the caller gets back after the sender has drained
//! the entity, so it carries only the status line and headers; the body bytes
//! travel next to it.

use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

use parking_lot::Mutex;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boxed byte stream supplied by the caller as a request entity.
pub type BodyStream = Box<dyn Read + Send>;

/// Request entity as held by a `RequesterState`.
///
/// Encoded values are plain bytes and can be replayed by every call derived
/// from the same base state. A caller-supplied stream sits in a shared slot
/// and is taken by the first render, so it is read at most once.
#[derive(Clone)]
pub enum BodySource {
    Bytes(Arc<[u8]>),
    Stream(Arc<Mutex<Option<BodyStream>>>),
}

impl BodySource {
    pub(crate) fn stream(stream: BodyStream) -> Self {
        BodySource::Stream(Arc::new(Mutex::new(Some(stream))))
    }

    /// Produce the entity for one outbound request, or `None` once a shared
    /// stream has been consumed.
    pub(crate) fn take(&self) -> Option<Body> {
        match self {
            BodySource::Bytes(bytes) => Some(Body::Bytes(bytes.to_vec())),
            BodySource::Stream(slot) => slot.lock().take().map(Body::Stream),
        }
    }
}

impl PartialEq for BodySource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BodySource::Bytes(a), BodySource::Bytes(b)) => a == b,
            (BodySource::Stream(a), BodySource::Stream(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for BodySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodySource::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            BodySource::Stream(slot) => f
                .debug_tuple("Stream")
                .field(&if slot.lock().is_some() { "pending" } else { "consumed" })
                .finish(),
        }
    }
}

/// Entity attached to a rendered `HttpRequest`.
pub enum Body {
    Bytes(Vec<u8>),
    Stream(BodyStream),
}

impl Body {
    /// Read the whole entity into memory.
    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        match self {
            Body::Bytes(bytes) => Ok(bytes),
            Body::Stream(mut stream) => {
                let mut buf = Vec::new();
                stream.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Body::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// An outbound HTTP request described as plain data.
///
/// Built by `RequesterState::render`. Headers keep their insertion order and
/// never contain two entries whose names differ only by case.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// What a `Transport` hands back: status, headers and the unread entity.
pub struct TransportResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// A completed HTTP response whose entity has already been drained.
///
/// Any status code is a valid response; callers branch on `status` to detect
/// application-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
