//! The transport-level adapter seam.
//!
//! A [`Vendor`] bundles the three functions that tie the pipeline to a
//! concrete HTTP library: the request executor and the pair of adapters
//! translating that library's response/error shapes into the generic
//! value/error shapes the rest of the chain works with. One implementation
//! is shared by every client a factory produces.

use async_trait::async_trait;

use crate::request::RequestDescriptor;

/// Transport adapter bundle, fixed per [`ClientFactory`](crate::client::ClientFactory).
///
/// The associated types split the raw transport shapes (`Raw`, `RawError`)
/// from the adapted shapes (`Value`, `Error`) consumers see. Adapters must be
/// pure mapping functions with no side effects beyond logging.
///
/// Failure routing: a failed [`execute`](Self::execute) and a failed
/// [`adapt_response`](Self::adapt_response) are treated identically — both
/// feed [`adapt_error`](Self::adapt_error). An `adapt_error` that returns
/// `Ok` converts the failure into a success: the value is routed to the
/// client's success handler, not its failure handler. This inversion is
/// intentional; it lets a vendor decide that some transport-level failures
/// are ordinary values (say, mapping 404 to an empty collection).
#[async_trait]
pub trait Vendor: Send + Sync {
    /// Raw transport response.
    type Raw: Send;
    /// Raw transport failure, also produced by a failing [`adapt_response`](Self::adapt_response).
    type RawError: Send;
    /// Adapted success value.
    type Value: Send;
    /// Adapted failure value.
    type Error: Send;

    /// Execute the composed request. The sole network extension point; owns
    /// timeouts, cancellation, and any transport-level concerns.
    async fn execute(&self, request: &RequestDescriptor)
        -> Result<Self::Raw, Self::RawError>;

    /// Map a raw success response to a value. Failing here routes the error
    /// through [`adapt_error`](Self::adapt_error) exactly like a transport
    /// failure — useful when a 2xx response carries an application-level
    /// failure flag.
    async fn adapt_response(&self, response: Self::Raw)
        -> Result<Self::Value, Self::RawError>;

    /// Map a raw failure to the adapted error, or return `Ok` to convert the
    /// failure into a success.
    async fn adapt_error(&self, error: Self::RawError)
        -> Result<Self::Value, Self::Error>;
}
