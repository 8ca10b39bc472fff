// ── View scopes ──
//
// Ties in-flight requests to the view that issued them. Closing (or
// dropping) the scope cancels pending work, and a result that lands after
// the close is discarded instead of applied.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CoreError;

/// Cancellation boundary owned by one page controller.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` inside the scope.
    ///
    /// Returns [`CoreError::Cancelled`] if the scope closes first, or if
    /// it closed while the result was being produced.
    pub async fn run<T, F>(&self, work: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        if self.token.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        tokio::select! {
            biased;
            () = self.token.cancelled() => {
                debug!("view closed, dropping in-flight request");
                Err(CoreError::Cancelled)
            }
            result = work => {
                if self.token.is_cancelled() {
                    Err(CoreError::Cancelled)
                } else {
                    result
                }
            }
        }
    }

    /// Close the scope, cancelling in-flight work.
    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A handle that closes this scope from elsewhere (another task, a
    /// signal handler).
    pub fn closer(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
