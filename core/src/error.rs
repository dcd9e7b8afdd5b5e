//! Error types for the requester.
//!
//! # Design
//! Failures fall into three disjoint domains. Configuration errors (missing
//! or unparsable base URL, unencodable body) are raised before any network
//! activity. Transport errors come from the `Transport` and never carry a
//! response. Decoding errors happen after a complete exchange, so they carry
//! the response and raw body for inspection. A non-2xx status is not an error.

use thiserror::Error;

use crate::http::HttpResponse;

/// The failure domain of a `RequesterError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Decoding,
}

/// Errors raised by a `Transport` implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http transport failed: {0}")]
    Http(#[from] ureq::Error),

    /// Reading a request or response entity failed.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors returned by `Requester::send` and the fallible option constructors.
#[derive(Debug, Error)]
pub enum RequesterError {
    /// No base URL was configured, or it was empty.
    #[error("missing base url")]
    MissingBaseUrl,

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request body value could not be represented as JSON.
    #[error("error marshaling body to JSON in http request: {0}")]
    EncodeBody(#[source] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The exchange completed but the body did not decode into the
    /// destination type.
    #[error("error unmarshaling response body: {source}")]
    Decode {
        response: Box<HttpResponse>,
        body: Vec<u8>,
        #[source]
        source: serde_json::Error,
    },
}

impl RequesterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequesterError::MissingBaseUrl
            | RequesterError::InvalidUrl { .. }
            | RequesterError::EncodeBody(_) => ErrorKind::Configuration,
            RequesterError::Transport(_) => ErrorKind::Transport,
            RequesterError::Decode { .. } => ErrorKind::Decoding,
        }
    }

    /// The response of the exchange, present only for decoding errors.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            RequesterError::Decode { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }

    /// The raw response body, present only for decoding errors.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            RequesterError::Decode { body, .. } => Some(body.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_carry_no_exchange() {
        let err = RequesterError::MissingBaseUrl;
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.response().is_none());
        assert!(err.body().is_none());
    }

    #[test]
    fn transport_errors_carry_no_exchange() {
        let err = RequesterError::from(TransportError::Other("connection refused".to_string()));
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.response().is_none());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn decode_errors_keep_response_and_body() {
        let source = serde_json::from_slice::<u32>(b"nope").unwrap_err();
        let err = RequesterError::Decode {
            response: Box::new(HttpResponse {
                status: 200,
                headers: Vec::new(),
            }),
            body: b"nope".to_vec(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Decoding);
        assert_eq!(err.response().map(|r| r.status), Some(200));
        assert_eq!(err.body(), Some(&b"nope"[..]));
    }
}
