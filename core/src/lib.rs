//! Declarative HTTP requests with JSON decoding.
//!
//! # Overview
//! A `Requester` is built once from base options (URL, default headers) and
//! then issues any number of calls, each with its own call options (method,
//! path, query, body). Options apply in order onto a per-call copy of the
//! base state, which is rendered into an `HttpRequest` and executed by a
//! `Transport`. The response entity is always drained before `send` returns.
//!
//! # Design
//! - Options are a closed enum; `RequestOption::apply` is the only mutation
//!   path into `RequesterState`.
//! - Body encoding happens when the option is constructed, so an
//!   unencodable value fails before a request exists.
//! - Errors are split into configuration, transport and decoding domains. A
//!   non-2xx status is a normal response, not an error.
//!
//! ```no_run
//! use http_requester::{get, query_param, url, Requester};
//!
//! #[derive(serde::Deserialize, Default)]
//! struct Fact {
//!     fact: String,
//! }
//!
//! let requester = Requester::new([url("https://catfact.ninja")]);
//! let mut fact = Fact::default();
//! let exchange = requester.send(&mut fact, [get("/fact"), query_param("max_length", "80")])?;
//! assert_eq!(exchange.response.status, 200);
//! # Ok::<(), http_requester::RequesterError>(())
//! ```

pub mod client;
mod codec;
pub mod error;
pub mod http;
pub mod options;
pub mod state;
pub mod transport;

pub use client::{Exchange, Requester};
pub use error::{ErrorKind, RequesterError, TransportError};
pub use http::{Body, BodySource, BodyStream, HttpMethod, HttpRequest, HttpResponse, TransportResponse};
pub use options::{
    body_reader, content_type, delete, get, header, method, patch, path, post, put, query_param,
    query_params, request_body, url, RequestOption,
};
pub use state::RequesterState;
pub use transport::{Transport, TransportConfig, UreqTransport};
