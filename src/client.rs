//! Client factory and the per-client request surface.

use std::sync::Arc;

use crate::compose::HeaderPolicy;
use crate::error::SendResult;
use crate::pipeline::{FailureHandler, Pipeline, SuccessHandler};
use crate::request::{
    Headers, Method, Payload, RequestDescriptor, RequestOptions, RequestParts,
};
use crate::vendor::Vendor;

/// Factory producing API clients that share one vendor adapter bundle.
///
/// Create it once per transport configuration; it is immutable thereafter.
/// Each call to [`client`](Self::client) starts the configuration of one
/// distinct API target.
///
/// # Examples
///
/// ```rust,no_run
/// use httpsmith::{ClientFactory, RequestOptions, Vendor};
/// # use httpsmith::RequestDescriptor;
/// # use async_trait::async_trait;
/// # struct MyVendor;
/// # #[async_trait]
/// # impl Vendor for MyVendor {
/// #     type Raw = String;
/// #     type RawError = String;
/// #     type Value = String;
/// #     type Error = String;
/// #     async fn execute(&self, _r: &RequestDescriptor) -> Result<String, String> { Ok(String::new()) }
/// #     async fn adapt_response(&self, r: String) -> Result<String, String> { Ok(r) }
/// #     async fn adapt_error(&self, e: String) -> Result<String, String> { Err(e) }
/// # }
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let factory = ClientFactory::new(MyVendor);
///
/// let api = factory
///     .client()
///     .base_url("https://api.example.com/v2")
///     .build();
///
/// let beers = api
///     .get("/beers", RequestOptions::new().query_param("size", 5))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ClientFactory<V: Vendor> {
    vendor: Arc<V>,
}

impl<V: Vendor> ClientFactory<V> {
    pub fn new(vendor: V) -> Self {
        Self {
            vendor: Arc::new(vendor),
        }
    }

    /// Start configuring a client for one API target.
    pub fn client(&self) -> ClientBuilder<V> {
        ClientBuilder {
            vendor: Arc::clone(&self.vendor),
            base_url: None,
            header_policy: HeaderPolicy::new(),
            success_handler: None,
            failure_handler: None,
        }
    }
}

impl<V: Vendor> Clone for ClientFactory<V> {
    fn clone(&self) -> Self {
        Self {
            vendor: Arc::clone(&self.vendor),
        }
    }
}

/// Builder for a [`Client`].
pub struct ClientBuilder<V: Vendor> {
    vendor: Arc<V>,
    base_url: Option<String>,
    header_policy: HeaderPolicy,
    success_handler: Option<SuccessHandler<V::Value, V::Error>>,
    failure_handler: Option<FailureHandler<V::Value, V::Error>>,
}

impl<V: Vendor> ClientBuilder<V> {
    /// URL all requests from this client are sent to. A request with an
    /// absolute URL of its own overrides it for that request.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Headers used when a request carries no header intent at all.
    /// A producer rather than a value, so consumers can read captured state
    /// at send time.
    pub fn default_headers(
        mut self,
        produce: impl Fn() -> Headers + Send + Sync + 'static,
    ) -> Self {
        self.header_policy = self.header_policy.default_headers(produce);
        self
    }

    /// Headers merged onto every request from this client, winning over
    /// explicit or default headers on conflict. Not applied to requests that
    /// suppress headers entirely.
    pub fn fixed_headers(
        mut self,
        produce: impl Fn() -> Headers + Send + Sync + 'static,
    ) -> Self {
        self.header_policy = self.header_policy.fixed_headers(produce);
        self
    }

    /// Hook observing every adapted success value together with the composed
    /// request. Its result is the final outcome of the call.
    pub fn on_success(
        mut self,
        handle: impl Fn(V::Value, &RequestDescriptor) -> Result<V::Value, V::Error>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.success_handler = Some(Arc::new(handle));
        self
    }

    /// Hook observing every adapted failure together with the composed
    /// request. Returning `Ok` resolves the call with a substitute value;
    /// returning `Err` is the final rejection.
    pub fn on_failure(
        mut self,
        handle: impl Fn(V::Error, &RequestDescriptor) -> Result<V::Value, V::Error>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.failure_handler = Some(Arc::new(handle));
        self
    }

    /// Build the client. Infallible: nothing here touches the network.
    pub fn build(self) -> Client<V> {
        Client {
            pipeline: Pipeline {
                vendor: self.vendor,
                base_url: self.base_url,
                header_policy: self.header_policy,
                success_handler: self.success_handler,
                failure_handler: self.failure_handler,
            },
        }
    }
}

/// A configured API client.
///
/// Stateless beyond its captured configuration: every call composes a fresh
/// descriptor, and concurrent calls do not interact.
pub struct Client<V: Vendor> {
    pipeline: Pipeline<V>,
}

impl<V: Vendor> Client<V> {
    /// Send a request described by raw fragments. The verb methods are thin
    /// builders over this.
    pub async fn send(&self, parts: RequestParts) -> SendResult<V::Value, V::Error> {
        self.pipeline.dispatch(parts).await
    }

    pub async fn get(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> SendResult<V::Value, V::Error> {
        self.send(RequestParts::for_verb(Method::Get, url, options)).await
    }

    pub async fn post(
        &self,
        url: &str,
        data: impl Into<Payload>,
        options: RequestOptions,
    ) -> SendResult<V::Value, V::Error> {
        let mut parts = RequestParts::for_verb(Method::Post, url, options);
        parts.data = Some(data.into());
        self.send(parts).await
    }

    pub async fn put(
        &self,
        url: &str,
        data: impl Into<Payload>,
        options: RequestOptions,
    ) -> SendResult<V::Value, V::Error> {
        let mut parts = RequestParts::for_verb(Method::Put, url, options);
        parts.data = Some(data.into());
        self.send(parts).await
    }

    pub async fn patch(
        &self,
        url: &str,
        data: impl Into<Payload>,
        options: RequestOptions,
    ) -> SendResult<V::Value, V::Error> {
        let mut parts = RequestParts::for_verb(Method::Patch, url, options);
        parts.data = Some(data.into());
        self.send(parts).await
    }

    pub async fn delete(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> SendResult<V::Value, V::Error> {
        self.send(RequestParts::for_verb(Method::Delete, url, options)).await
    }

    pub async fn options(
        &self,
        url: &str,
        opts: RequestOptions,
    ) -> SendResult<V::Value, V::Error> {
        self.send(RequestParts::for_verb(Method::Options, url, opts)).await
    }
}
