//! The long-lived requester and its send pipeline.
//!
//! # Design
//! `Requester` holds a base `RequesterState` built once from the construction
//! options, plus a `Transport`. `send` derives a per-call state, renders it,
//! executes it, drains the entity into memory and, when asked to, decodes
//! the body into the caller's destination. The base state is read-only after
//! construction, so a requester can be shared across threads when its
//! transport allows it.

use std::io::Read;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::codec;
use crate::error::{RequesterError, TransportError};
use crate::http::HttpResponse;
use crate::options::RequestOption;
use crate::state::RequesterState;
use crate::transport::{Transport, UreqTransport};

/// A completed HTTP exchange: the response and its fully-read body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub response: HttpResponse,
    pub body: Vec<u8>,
}

impl Exchange {
    pub fn into_parts(self) -> (HttpResponse, Vec<u8>) {
        (self.response, self.body)
    }
}

/// Client handle holding base configuration shared by all calls.
#[derive(Debug, Clone)]
pub struct Requester<T = UreqTransport> {
    base: RequesterState,
    transport: T,
}

impl Requester<UreqTransport> {
    /// Build a requester over the default ureq transport.
    pub fn new(options: impl IntoIterator<Item = RequestOption>) -> Self {
        Self::with_transport(UreqTransport::default(), options)
    }
}

impl<T: Transport> Requester<T> {
    pub fn with_transport(transport: T, options: impl IntoIterator<Item = RequestOption>) -> Self {
        Self {
            base: RequesterState::new(options),
            transport,
        }
    }

    pub fn base(&self) -> &RequesterState {
        &self.base
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and decode a non-empty body into `destination`.
    ///
    /// Any status code counts as a completed exchange. A decode failure is
    /// returned as `RequesterError::Decode`, which still carries the response
    /// and the raw body.
    pub fn send<D: DeserializeOwned>(
        &self,
        destination: &mut D,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<Exchange, RequesterError> {
        let exchange = self.send_raw(options)?;
        if let Err(err) = codec::decode_into(destination, &exchange.response, &exchange.body) {
            debug!(status = exchange.response.status, error = %err, "response body did not decode");
            return Err(err);
        }
        Ok(exchange)
    }

    /// Send a request without decoding the body.
    pub fn send_raw(
        &self,
        options: impl IntoIterator<Item = RequestOption>,
    ) -> Result<Exchange, RequesterError> {
        let request = self.base.derive(options).render()?;
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, "sending request");

        let mut response = self.transport.execute(request).map_err(|err| {
            warn!(%method, %url, error = %err, "transport failed");
            err
        })?;

        let mut body = Vec::new();
        response
            .body
            .read_to_end(&mut body)
            .map_err(TransportError::from)?;
        debug!(status = response.status, bytes = body.len(), "received response");

        Ok(Exchange {
            response: HttpResponse {
                status: response.status,
                headers: response.headers,
            },
            body,
        })
    }
}
