//! Descriptor assembly and the dispatch chain.
//!
//! # Design
//! Assembly is pure: the same fragments always produce the same descriptor,
//! and nothing is cached between calls. Dispatch threads the outcome through
//! the adapter chain as explicit `Result` values — including the documented
//! inversion where a vendor's error adapter converts a failure back into a
//! success — so the control flow stays visible instead of hiding behind
//! rejection-recovery semantics.

use std::sync::Arc;

use tracing::debug;

use crate::compose;
use crate::compose::HeaderPolicy;
use crate::config::FIRST_ATTEMPT;
use crate::error::{Error, SendResult};
use crate::request::{RequestDescriptor, RequestParts};
use crate::vendor::Vendor;

/// Consumer hook observing an adapted success value. Its result is final:
/// `Ok` resolves the call, `Err` rejects it.
pub type SuccessHandler<T, E> =
    Arc<dyn Fn(T, &RequestDescriptor) -> Result<T, E> + Send + Sync>;

/// Consumer hook observing an adapted failure. `Ok` resolves the call with a
/// substitute value; `Err` is the final rejection.
pub type FailureHandler<T, E> =
    Arc<dyn Fn(E, &RequestDescriptor) -> Result<T, E> + Send + Sync>;

/// The per-client dispatch engine shared by `send` and the verb methods.
///
/// Holds the client's captured configuration; carries no mutable state, so
/// concurrent dispatches do not interact.
pub struct Pipeline<V: Vendor> {
    pub(crate) vendor: Arc<V>,
    pub(crate) base_url: Option<String>,
    pub(crate) header_policy: HeaderPolicy,
    pub(crate) success_handler: Option<SuccessHandler<V::Value, V::Error>>,
    pub(crate) failure_handler: Option<FailureHandler<V::Value, V::Error>>,
}

impl<V: Vendor> Pipeline<V> {
    /// Compose the canonical descriptor from caller-supplied fragments.
    ///
    /// Pure except for the bare-domain warning; the only failure is a body
    /// that cannot be serialized, raised here so it never reaches the
    /// vendor.
    pub fn assemble(&self, parts: &RequestParts) -> Result<RequestDescriptor, serde_json::Error> {
        let method = parts.method.unwrap_or_default();
        let url = compose::url::compose(
            self.base_url.as_deref(),
            parts.url.as_deref(),
            &parts.path_params,
            &parts.query_params,
        );
        let headers = compose::headers::compose(&parts.headers, &self.header_policy);
        let body = compose::body::encode(parts.data.as_ref())?;
        let attempt_number = parts.attempt_number.unwrap_or(FIRST_ATTEMPT);

        Ok(RequestDescriptor {
            method,
            url,
            headers,
            body,
            attempt_number,
        })
    }

    /// Assemble, execute, and thread the outcome through the adapter chain.
    pub async fn dispatch(&self, parts: RequestParts) -> SendResult<V::Value, V::Error> {
        let descriptor = self.assemble(&parts).map_err(Error::Body)?;

        debug!(
            method = descriptor.method.as_str(),
            url = descriptor.url.as_str(),
            attempt = descriptor.attempt_number,
            has_body = descriptor.body.is_some(),
            "dispatching request"
        );

        // Both a failed execute and a failed adapt_response feed adapt_error.
        // An adapt_error that returns Ok converts the failure into a success
        // and is routed to the success handler below.
        let outcome = match self.vendor.execute(&descriptor).await {
            Ok(raw) => match self.vendor.adapt_response(raw).await {
                Ok(value) => Ok(value),
                Err(raw_error) => self.vendor.adapt_error(raw_error).await,
            },
            Err(raw_error) => self.vendor.adapt_error(raw_error).await,
        };

        match outcome {
            Ok(value) => match &self.success_handler {
                Some(handle) => handle(value, &descriptor).map_err(Error::Rejected),
                None => Ok(value),
            },
            Err(error) => match &self.failure_handler {
                Some(handle) => handle(error, &descriptor).map_err(Error::Rejected),
                None => Err(Error::Rejected(error)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::request::{HeaderSpec, Headers, Method, Payload};

    /// Vendor that never gets invoked; assembly tests stop before dispatch.
    struct InertVendor;

    #[async_trait]
    impl Vendor for InertVendor {
        type Raw = ();
        type RawError = ();
        type Value = ();
        type Error = ();

        async fn execute(&self, _request: &RequestDescriptor) -> Result<(), ()> {
            Ok(())
        }

        async fn adapt_response(&self, _response: ()) -> Result<(), ()> {
            Ok(())
        }

        async fn adapt_error(&self, _error: ()) -> Result<(), ()> {
            Err(())
        }
    }

    fn pipeline(base_url: Option<&str>) -> Pipeline<InertVendor> {
        Pipeline {
            vendor: Arc::new(InertVendor),
            base_url: base_url.map(String::from),
            header_policy: HeaderPolicy::new(),
            success_handler: None,
            failure_handler: None,
        }
    }

    #[test]
    fn assemble_applies_defaults() {
        let descriptor = pipeline(Some("https://api.test/v1"))
            .assemble(&RequestParts::new())
            .unwrap();
        assert_eq!(
            descriptor,
            RequestDescriptor {
                method: Method::Get,
                url: "https://api.test/v1".to_string(),
                headers: Some(Headers::new()),
                body: None,
                attempt_number: 1,
            }
        );
    }

    #[test]
    fn assemble_composes_query_and_method() {
        let parts = RequestParts::new()
            .method(Method::Get)
            .url("/users")
            .query_param("id", 5);
        let descriptor = pipeline(Some("https://api.test/v1")).assemble(&parts).unwrap();
        assert_eq!(descriptor.method, Method::Get);
        assert_eq!(descriptor.url, "https://api.test/v1/users?id=5");
        assert_eq!(descriptor.attempt_number, 1);
    }

    #[test]
    fn assemble_encodes_json_body() {
        let parts = RequestParts::new()
            .method(Method::Post)
            .url("/users")
            .data(serde_json::json!({"name": "a"}));
        let descriptor = pipeline(Some("https://api.test/v1")).assemble(&parts).unwrap();
        assert_eq!(descriptor.body.as_deref(), Some(r#"{"name":"a"}"#));
    }

    #[test]
    fn assemble_passes_attempt_number_through() {
        let parts = RequestParts::new().attempt_number(4);
        let descriptor = pipeline(Some("https://api.test")).assemble(&parts).unwrap();
        assert_eq!(descriptor.attempt_number, 4);
    }

    #[test]
    fn assemble_suppressed_headers_are_none() {
        let parts = RequestParts {
            headers: HeaderSpec::Suppress,
            ..RequestParts::default()
        };
        let descriptor = pipeline(Some("https://api.test")).assemble(&parts).unwrap();
        assert_eq!(descriptor.headers, None);
    }

    #[test]
    fn assemble_is_idempotent() {
        let parts = RequestParts::new()
            .method(Method::Post)
            .url("/users")
            .path_param(123)
            .query_param("expand", "profile")
            .headers(Headers::from([("X-Trace", "abc")]))
            .data(Payload::Text("raw".to_string()))
            .attempt_number(2);
        let engine = pipeline(Some("https://api.test/v1"));
        let first = engine.assemble(&parts).unwrap();
        let second = engine.assemble(&parts).unwrap();
        assert_eq!(first, second);
    }
}
