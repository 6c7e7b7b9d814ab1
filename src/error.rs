//! Send-path error type.
//!
//! The pipeline distinguishes exactly two failure channels callers handle
//! differently: a request body that could not be encoded (raised before any
//! network activity), and the vendor-adapted rejection produced by the
//! adapter chain. Everything transport-specific lives in the vendor's own
//! error type `E`.

/// Error returned by [`Client::send`](crate::client::Client::send) and the
/// verb methods.
///
/// `E` is the vendor's adapted error type — whatever
/// [`Vendor::adapt_error`](crate::vendor::Vendor::adapt_error) and the
/// client's failure handler produce.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The request data could not be serialized to JSON. Raised during
    /// composition, before the vendor is invoked.
    #[error("failed to encode request body as JSON")]
    Body(#[from] serde_json::Error),

    /// The vendor-adapted failure channel, after any failure handler ran.
    #[error("request rejected")]
    Rejected(E),
}

impl<E> Error<E> {
    /// The adapted rejection, if that is what this error is.
    pub fn into_rejection(self) -> Option<E> {
        match self {
            Error::Rejected(error) => Some(error),
            Error::Body(_) => None,
        }
    }
}

/// Result of a dispatched request: the vendor's adapted value, or [`Error`].
pub type SendResult<T, E> = Result<T, Error<E>>;
