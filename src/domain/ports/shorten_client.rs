//! Port for the remote shortening service.

use crate::domain::entities::ShortenedResult;
use crate::error::ShortenError;
use async_trait::async_trait;

/// Client for the remote shortening service.
///
/// Each call issues exactly one request. There are no retries and no
/// cancellation; concurrent calls are independent and complete in whatever
/// order the service answers.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpShortenClient`] - reqwest-backed client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenClient: Send + Sync {
    /// Requests a short URL for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::RequestFailed`] on transport failure, a non-2xx
    /// status, or a success body without `short_url`.
    async fn shorten(&self, url: &str) -> Result<ShortenedResult, ShortenError>;
}
