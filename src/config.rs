//! Crate-wide constants.

/// Placeholder destination used when neither a base URL nor a request URL is
/// supplied. `.invalid` is a reserved TLD, so a misconfigured client fails at
/// the transport with an obvious name instead of panicking during
/// composition.
pub const NO_DESTINATION: &str = "http://no-destination.invalid";

/// Attempt number assigned to a request that does not specify one. The
/// pipeline never retries; callers owning retry logic increment the field
/// themselves.
pub const FIRST_ATTEMPT: u32 = 1;
