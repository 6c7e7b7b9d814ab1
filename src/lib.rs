//! # httpsmith
//!
//! Transport-agnostic HTTP client factory.
//!
//! Two builder layers separate the concerns of an integration:
//!
//! - A [`Vendor`] bundles the transport-level adapters — the request
//!   executor plus the response/error mappers for one HTTP library — and is
//!   plugged into a [`ClientFactory`] once.
//! - The factory then produces any number of [`Client`]s, each with its own
//!   base URL, header policy, and optional success/failure handlers, all
//!   sharing the vendor's adapters.
//!
//! The crate owns request composition (URL, headers, body, attempt number)
//! and the adapter chain; it performs no I/O of its own. Timeouts,
//! cancellation, and retries belong to the vendor — the pipeline only
//! carries a passive attempt counter for external retry bookkeeping.
//!
//! ## Quick Start
//!
//! See [`ClientFactory`] for a complete example. The short of it:
//!
//! ```rust,ignore
//! let factory = ClientFactory::new(MyVendor::new());
//!
//! let api = factory
//!     .client()
//!     .base_url("https://api.example.com/v2")
//!     .fixed_headers(|| Headers::from([("User-Agent", "myapp/1.0")]))
//!     .build();
//!
//! let user = api.get("/users/42", RequestOptions::new()).await?;
//! ```
//!
//! ## Composition rules worth knowing
//!
//! - A request URL that is absolute overrides the client's base URL for that
//!   request; a relative one is appended to it.
//! - Header precedence, lowest to highest: default headers < explicit
//!   request headers < fixed headers. [`RequestOptions::no_headers`] sends a
//!   request headerless and skips both producers.
//! - Query values are joined verbatim (`name=value`) with no
//!   percent-encoding; pre-encode reserved characters.

pub mod client;
pub mod compose;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod vendor;

// Re-exports for ergonomic usage
pub use client::{Client, ClientBuilder, ClientFactory};
pub use compose::{crude_query_string, HeaderPolicy};
pub use config::{FIRST_ATTEMPT, NO_DESTINATION};
pub use error::{Error, SendResult};
pub use request::{
    HeaderSpec, Headers, Method, Payload, RequestDescriptor, RequestOptions, RequestParts,
};
pub use vendor::Vendor;
