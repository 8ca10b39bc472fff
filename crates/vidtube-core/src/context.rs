// ── Client context ──
//
// The injectable bundle every view receives: the API client and the
// session. Replaces a process-global store; tests build one per case.

use std::future::Future;
use std::sync::Arc;

use vidtube_api::ApiClient;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::routes::Navigator;
use crate::session::Session;

/// API client plus session, cheaply cloneable.
#[derive(Clone)]
pub struct Context {
    api: Arc<ApiClient>,
    session: Session,
}

impl Context {
    /// Build a client for `config` with a fresh cookie jar and an empty
    /// session.
    pub fn new(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self::with_api(api, navigator))
    }

    /// Wrap an existing API client.
    pub fn with_api(api: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        let api = Arc::new(api);
        let session = Session::new(Arc::clone(&api), navigator);
        Self { api, session }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Await an API call and lift its error into [`CoreError`].
    ///
    /// An `Unauthorized` reply while signed in expires the session.
    pub async fn call<T, F>(&self, request: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, vidtube_api::Error>>,
    {
        match request.await {
            Ok(value) => Ok(value),
            Err(e) => {
                if e.is_unauthorized() {
                    self.session.expire();
                }
                Err(e.into())
            }
        }
    }
}
