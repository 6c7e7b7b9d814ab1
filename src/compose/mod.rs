//! Pure request-composition helpers.
//!
//! Everything here is stateless and side-effect free (beyond logging):
//! the pipeline calls these to turn caller-supplied fragments into the
//! canonical request descriptor.

pub mod body;
pub mod headers;
pub mod url;

pub use headers::{HeaderPolicy, HeaderSource};
pub use url::crude_query_string;
