//! Header composition.
//!
//! Three inputs can carry headers: the per-request intent, the client's
//! default-header producer, and its fixed-header producer. Producers are
//! zero-argument closures so consumers can read captured state (tokens,
//! clocks) at send time rather than at client-build time.

use std::fmt;
use std::sync::Arc;

use crate::request::{HeaderSpec, Headers};

/// Zero-argument header producer, invoked once per composition.
pub type HeaderSource = Arc<dyn Fn() -> Headers + Send + Sync>;

/// Per-client header configuration.
#[derive(Clone, Default)]
pub struct HeaderPolicy {
    /// Used only when the request carries no header intent at all.
    pub default_headers: Option<HeaderSource>,
    /// Merged on top of whatever headers resulted, whenever the request is
    /// not explicitly headerless. Wins on name conflict.
    pub fixed_headers: Option<HeaderSource>,
}

impl HeaderPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_headers(
        mut self,
        produce: impl Fn() -> Headers + Send + Sync + 'static,
    ) -> Self {
        self.default_headers = Some(Arc::new(produce));
        self
    }

    pub fn fixed_headers(
        mut self,
        produce: impl Fn() -> Headers + Send + Sync + 'static,
    ) -> Self {
        self.fixed_headers = Some(Arc::new(produce));
        self
    }
}

impl fmt::Debug for HeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderPolicy")
            .field("default_headers", &self.default_headers.is_some())
            .field("fixed_headers", &self.fixed_headers.is_some())
            .finish()
    }
}

/// Resolve the final headers for a request.
///
/// | intent | result |
/// |---|---|
/// | `Suppress` | `None`; neither producer is invoked |
/// | `Inherit` | defaults (or empty), then fixed overlaid |
/// | `Explicit` | the supplied mapping, then fixed overlaid |
///
/// The default producer runs if and only if the intent is `Inherit`; the
/// fixed producer runs whenever the result is not `None`.
pub fn compose(spec: &HeaderSpec, policy: &HeaderPolicy) -> Option<Headers> {
    let mut headers = match spec {
        HeaderSpec::Suppress => return None,
        HeaderSpec::Inherit => policy
            .default_headers
            .as_ref()
            .map(|produce| produce())
            .unwrap_or_default(),
        HeaderSpec::Explicit(explicit) => explicit.clone(),
    };

    if let Some(produce) = &policy.fixed_headers {
        headers.merge(&produce());
    }

    Some(headers)
}
