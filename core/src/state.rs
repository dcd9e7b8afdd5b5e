//! Request-builder state and its rendering into an `HttpRequest`.
//!
//! # Design
//! A `Requester` keeps one base state built from its construction options
//! and never mutates it afterwards. Each call clones that base (maps and
//! lists are owned copies, not shared) and layers the call options on the
//! clone, so concurrent calls cannot observe each other's headers or query
//! values. Only a stream body is shared, and it is consumed by the first
//! render that takes it.

use tracing::warn;
use url::Url;

use crate::error::RequesterError;
use crate::http::{BodySource, HttpMethod, HttpRequest};
use crate::options::RequestOption;

const CONTENT_TYPE: &str = "Content-Type";

/// Everything the options have configured for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequesterState {
    pub(crate) base_url: Option<String>,
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) content_type: Option<String>,
    pub(crate) body: Option<BodySource>,
}

impl RequesterState {
    pub fn new(options: impl IntoIterator<Item = RequestOption>) -> Self {
        let mut state = Self::default();
        state.apply_all(options);
        state
    }

    /// Apply `options` in the order given.
    pub fn apply_all(&mut self, options: impl IntoIterator<Item = RequestOption>) {
        for option in options {
            option.apply(self);
        }
    }

    /// A per-call copy of this state with `options` layered on top.
    pub fn derive(&self, options: impl IntoIterator<Item = RequestOption>) -> Self {
        let mut state = self.clone();
        state.apply_all(options);
        state
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> Option<&BodySource> {
        self.body.as_ref()
    }

    pub(crate) fn set_header(&mut self, name: String, value: String) {
        match self
            .headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => *entry = (name, value),
            None => self.headers.push((name, value)),
        }
    }

    /// Render this state into one outbound request.
    pub fn render(&self) -> Result<HttpRequest, RequesterError> {
        let base = match self.base_url.as_deref() {
            Some(base) if !base.is_empty() => base,
            _ => return Err(RequesterError::MissingBaseUrl),
        };

        let raw = if self.path.starts_with('/') {
            format!("{}{}", base.trim_end_matches('/'), self.path)
        } else {
            format!("{base}{}", self.path)
        };
        let mut url = Url::parse(&raw).map_err(|source| RequesterError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        let mut headers = self.headers.clone();
        if let Some(content_type) = &self.content_type {
            if !headers.iter().any(|(key, _)| key.eq_ignore_ascii_case(CONTENT_TYPE)) {
                headers.push((CONTENT_TYPE.to_string(), content_type.clone()));
            }
        }

        let body = match &self.body {
            Some(source) => {
                let body = source.take();
                if body.is_none() {
                    warn!(url = %url, "request body stream was already consumed by an earlier call");
                }
                body
            }
            None => None,
        };

        Ok(HttpRequest {
            method: self.method,
            url: url.into(),
            headers,
            body,
        })
    }
}
