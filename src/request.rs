//! Plain-data request types.
//!
//! Requests are described as data and handed to the vendor adapter for
//! execution. All fields use owned types so descriptors can be logged,
//! compared, and replayed without lifetime concerns.

use std::fmt;

use serde::Serialize;

use crate::config::FIRST_ATTEMPT;

/// HTTP verb for a request. Renders upper-case on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Method {
    /// The upper-case wire form of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered header mapping.
///
/// Setting a name that is already present replaces the value in place,
/// keeping the original position; setting a new name appends. Names are
/// matched verbatim — HTTP case-insensitivity is the transport adapter's
/// concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Chainable form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Overlay another mapping onto this one; the overlay wins on conflict.
    pub fn merge(&mut self, overlay: &Headers) {
        for (name, value) in overlay.iter() {
            self.set(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.set(name, value);
        }
        headers
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Headers {
    fn from(entries: [(&str, &str); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Per-request header intent.
///
/// Re-expresses the three-way "mapping vs. explicitly none vs. unspecified"
/// choice as a tagged value instead of an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeaderSpec {
    /// Let the client's header policy decide (default and fixed producers).
    #[default]
    Inherit,
    /// Use this mapping; the client's fixed headers still overlay it.
    Explicit(Headers),
    /// Send the request headerless; no producer is invoked.
    Suppress,
}

impl From<Headers> for HeaderSpec {
    fn from(headers: Headers) -> Self {
        HeaderSpec::Explicit(headers)
    }
}

/// Request data, before encoding to the wire-ready body string.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Passed through unchanged. Useful for pre-encoded form bodies.
    Text(String),
    /// Serialized to JSON text by the encoder.
    Json(serde_json::Value),
}

impl Payload {
    /// Build a JSON payload from any serializable value.
    pub fn from_serialize<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        Ok(Payload::Json(serde_json::to_value(value)?))
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

/// The canonical request unit handed to the vendor adapter.
///
/// Fully composed: the URL is absolute, headers reflect the client's policy,
/// and the body (when present) is the wire-ready string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Composed absolute URL.
    pub url: String,
    /// `None` means the request is sent without any headers.
    pub headers: Option<Headers>,
    /// Present only when the caller supplied data.
    pub body: Option<String>,
    /// Starts at 1. Callers owning retry logic increment it themselves;
    /// the pipeline never retries.
    pub attempt_number: u32,
}

/// Caller-supplied request fragments, all optional.
///
/// [`Client::send`](crate::client::Client::send) composes these into a
/// [`RequestDescriptor`]; the verb methods are thin builders over this type.
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    pub method: Option<Method>,
    /// Relative path appended to the client's base URL, or a full absolute
    /// URL overriding it for this request.
    pub url: Option<String>,
    /// Extra path segments appended in order after the resolved path.
    pub path_params: Vec<String>,
    /// Name/value pairs applied onto the URL's query component in order.
    pub query_params: Vec<(String, String)>,
    pub headers: HeaderSpec,
    pub data: Option<Payload>,
    pub attempt_number: Option<u32>,
}

impl RequestParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn path_param(mut self, segment: impl ToString) -> Self {
        self.path_params.push(segment.to_string());
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push((name.into(), value.to_string()));
        self
    }

    pub fn headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = HeaderSpec::Explicit(headers.into());
        self
    }

    /// Send the request headerless, bypassing the client's header policy.
    pub fn no_headers(mut self) -> Self {
        self.headers = HeaderSpec::Suppress;
        self
    }

    pub fn data(mut self, data: impl Into<Payload>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn attempt_number(mut self, attempt: u32) -> Self {
        self.attempt_number = Some(attempt);
        self
    }

    pub(crate) fn for_verb(method: Method, url: &str, options: RequestOptions) -> Self {
        RequestParts {
            method: Some(method),
            url: Some(url.to_string()),
            path_params: options.path_params,
            query_params: options.query_params,
            headers: options.headers,
            data: None,
            attempt_number: options.attempt_number,
        }
    }
}

/// Per-request options accepted by the verb methods.
///
/// Everything a verb call can vary besides the URL and the body.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderSpec,
    pub path_params: Vec<String>,
    pub query_params: Vec<(String, String)>,
    pub attempt_number: Option<u32>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = HeaderSpec::Explicit(headers.into());
        self
    }

    /// Send the request headerless, bypassing the client's header policy.
    pub fn no_headers(mut self) -> Self {
        self.headers = HeaderSpec::Suppress;
        self
    }

    pub fn path_param(mut self, segment: impl ToString) -> Self {
        self.path_params.push(segment.to_string());
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push((name.into(), value.to_string()));
        self
    }

    pub fn attempt_number(mut self, attempt: u32) -> Self {
        self.attempt_number = Some(attempt);
        self
    }
}

impl RequestDescriptor {
    /// Whether this is the first attempt at the request.
    pub fn is_first_attempt(&self) -> bool {
        self.attempt_number == FIRST_ATTEMPT
    }
}
