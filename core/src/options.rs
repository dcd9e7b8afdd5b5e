//! Request options and their constructors.
//!
//! An option is one unit of configuration. Applying it mutates a
//! `RequesterState`; sequences are applied strictly in order, so a later
//! option targeting the same scalar field overrides an earlier one while
//! query parameters accumulate.

use std::io::Read;

use serde::Serialize;

use crate::codec;
use crate::error::RequesterError;
use crate::http::{BodySource, HttpMethod};
use crate::state::RequesterState;

/// A single piece of request configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOption {
    Url(String),
    /// Sets the method together with the path appended to the base URL.
    Method { method: HttpMethod, path: String },
    Path(String),
    /// Replaces any header with the same name, ignoring case.
    Header { name: String, value: String },
    ContentType(String),
    /// Appends one value for `key`; repeated keys yield repeated pairs.
    QueryParam { key: String, value: String },
    /// Replaces the whole query mapping.
    QueryParams(Vec<(String, String)>),
    Body(BodySource),
}

impl RequestOption {
    pub fn apply(self, state: &mut RequesterState) {
        match self {
            RequestOption::Url(url) => state.base_url = Some(url),
            RequestOption::Method { method, path } => {
                state.method = method;
                state.path = path;
            }
            RequestOption::Path(path) => state.path = path,
            RequestOption::Header { name, value } => state.set_header(name, value),
            RequestOption::ContentType(value) => state.content_type = Some(value),
            RequestOption::QueryParam { key, value } => state.query.push((key, value)),
            RequestOption::QueryParams(params) => state.query = params,
            RequestOption::Body(body) => state.body = Some(body),
        }
    }
}

pub fn url(url: impl Into<String>) -> RequestOption {
    RequestOption::Url(url.into())
}

pub fn method(method: HttpMethod, path: impl Into<String>) -> RequestOption {
    RequestOption::Method {
        method,
        path: path.into(),
    }
}

pub fn get(path: impl Into<String>) -> RequestOption {
    method(HttpMethod::Get, path)
}

pub fn post(path: impl Into<String>) -> RequestOption {
    method(HttpMethod::Post, path)
}

pub fn put(path: impl Into<String>) -> RequestOption {
    method(HttpMethod::Put, path)
}

pub fn patch(path: impl Into<String>) -> RequestOption {
    method(HttpMethod::Patch, path)
}

pub fn delete(path: impl Into<String>) -> RequestOption {
    method(HttpMethod::Delete, path)
}

pub fn path(path: impl Into<String>) -> RequestOption {
    RequestOption::Path(path.into())
}

pub fn header(name: impl Into<String>, value: impl Into<String>) -> RequestOption {
    RequestOption::Header {
        name: name.into(),
        value: value.into(),
    }
}

/// Content-Type used when no explicit `Content-Type` header is set.
pub fn content_type(value: impl Into<String>) -> RequestOption {
    RequestOption::ContentType(value.into())
}

pub fn query_param(key: impl Into<String>, value: impl Into<String>) -> RequestOption {
    RequestOption::QueryParam {
        key: key.into(),
        value: value.into(),
    }
}

pub fn query_params<I, K, V>(params: I) -> RequestOption
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    RequestOption::QueryParams(
        params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    )
}

/// Use `reader` as the request entity. The stream is read at most once.
pub fn body_reader(reader: impl Read + Send + 'static) -> RequestOption {
    RequestOption::Body(BodySource::stream(Box::new(reader)))
}

/// Encode `value` as JSON now and use it as the request entity.
///
/// Fails before any request exists if the value has no JSON representation.
pub fn request_body<T: Serialize + ?Sized>(value: &T) -> Result<RequestOption, RequesterError> {
    let bytes = codec::encode(value)?;
    Ok(RequestOption::Body(BodySource::Bytes(bytes.into())))
}
