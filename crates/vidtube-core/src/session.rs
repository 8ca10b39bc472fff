// ── Session store ──
//
// The one piece of process-wide mutable state: who is signed in, and
// whether that is still being worked out. Held behind an `Arc` and
// published through a `watch` channel so any number of views can observe
// transitions without polling.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};
use vidtube_api::{ApiClient, Credentials, RegisterForm, User};

use crate::error::CoreError;
use crate::routes::{Navigator, Route};

// ── SessionState ─────────────────────────────────────────────────

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionPhase {
    /// Not yet rehydrated from the session cookie.
    Unknown,
    Authenticated,
    Anonymous,
}

/// Snapshot of the session published to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub identity: Option<User>,
    pub loading: bool,
}

impl SessionState {
    fn initial() -> Self {
        Self {
            phase: SessionPhase::Unknown,
            identity: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    fn sign_in(&mut self, user: User) {
        self.identity = Some(user);
        self.phase = SessionPhase::Authenticated;
    }

    fn sign_out(&mut self) {
        self.identity = None;
        self.phase = SessionPhase::Anonymous;
    }
}

// ── Session ──────────────────────────────────────────────────────

/// Authenticated session handle.
///
/// Cheaply cloneable via `Arc<SessionInner>`. The cookie itself lives in
/// the API client's jar; this type only tracks the identity the backend
/// bound to it.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    api: Arc<ApiClient>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Create an empty session in the `Unknown` phase with `loading` set.
    pub fn new(api: Arc<ApiClient>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            inner: Arc::new(SessionInner {
                api,
                navigator,
                state,
            }),
        }
    }

    // ── Transitions ──────────────────────────────────────────────

    /// Resolve the identity bound to the session cookie.
    ///
    /// Any failure leaves the session `Anonymous`. `loading` is cleared
    /// either way.
    pub async fn rehydrate(&self) -> Option<User> {
        self.set_loading(true);
        match self.inner.api.current_user().await {
            Ok(user) => {
                debug!(username = %user.username, "session rehydrated");
                self.inner.state.send_modify(|s| {
                    s.sign_in(user.clone());
                    s.loading = false;
                });
                Some(user)
            }
            Err(e) => {
                debug!(error = %e, "no active session");
                self.inner.state.send_modify(|s| {
                    s.sign_out();
                    s.loading = false;
                });
                None
            }
        }
    }

    /// Authenticate with username or email plus password.
    ///
    /// On success the identity is replaced and the navigator is sent to
    /// the home view. On failure the identity is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, CoreError> {
        self.set_loading(true);
        let result = self.inner.api.login(credentials).await;
        self.finish_sign_in(result, "login")
    }

    /// Create an account and sign in as it.
    pub async fn register(&self, form: &RegisterForm) -> Result<User, CoreError> {
        self.set_loading(true);
        let result = self.inner.api.register(form).await;
        self.finish_sign_in(result, "register")
    }

    /// End the session. The local identity is cleared even if the backend
    /// call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.inner.api.logout().await {
            warn!(error = %e, "logout request failed");
        }
        self.inner.state.send_modify(|s| {
            s.sign_out();
            s.loading = false;
        });
        info!("logged out");
        self.inner.navigator.navigate(Route::Login);
    }

    /// Re-fetch the current identity without toggling `loading`.
    ///
    /// Used after account edits. A failure clears the identity.
    pub async fn refresh_identity(&self) -> Result<User, CoreError> {
        match self.inner.api.current_user().await {
            Ok(user) => {
                self.inner.state.send_modify(|s| s.sign_in(user.clone()));
                Ok(user)
            }
            Err(e) => {
                debug!(error = %e, "identity refresh failed, clearing session");
                self.inner.state.send_modify(SessionState::sign_out);
                Err(e.into())
            }
        }
    }

    /// The backend rejected the session cookie.
    pub(crate) fn expire(&self) {
        let was_authenticated = self.inner.state.send_if_modified(|s| {
            if s.phase == SessionPhase::Authenticated {
                s.sign_out();
                true
            } else {
                false
            }
        });
        if was_authenticated {
            warn!("session rejected by backend, signing out");
            self.inner.navigator.navigate(Route::Login);
        }
    }

    // ── Read surface ─────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<User> {
        self.inner.state.borrow().identity.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.state.borrow().phase
    }

    /// Subscribe to session transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Session transitions as a `Stream`, starting with the current state.
    pub fn changes(&self) -> WatchStream<SessionState> {
        WatchStream::new(self.subscribe())
    }

    /// The signed-in identity, or `Unauthenticated` naming the attempted
    /// action.
    pub fn require_identity(&self, action: &str) -> Result<User, CoreError> {
        self.identity().ok_or_else(|| CoreError::Unauthenticated {
            action: action.to_owned(),
        })
    }

    // ── Internals ────────────────────────────────────────────────

    fn set_loading(&self, loading: bool) {
        self.inner.state.send_if_modified(|s| {
            let changed = s.loading != loading;
            s.loading = loading;
            changed
        });
    }

    fn finish_sign_in(
        &self,
        result: Result<User, vidtube_api::Error>,
        action: &str,
    ) -> Result<User, CoreError> {
        match result {
            Ok(user) => {
                info!(username = %user.username, action, "signed in");
                self.inner.state.send_modify(|s| {
                    s.sign_in(user.clone());
                    s.loading = false;
                });
                self.inner.navigator.navigate(Route::Home);
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, action, "sign-in failed");
                self.inner.state.send_modify(|s| {
                    if s.phase == SessionPhase::Unknown {
                        s.phase = SessionPhase::Anonymous;
                    }
                    s.loading = false;
                });
                Err(rejected_sign_in(e))
            }
        }
    }
}

/// A 401 on login or register means the credentials were refused, not that
/// a session lapsed.
fn rejected_sign_in(err: vidtube_api::Error) -> CoreError {
    match err {
        vidtube_api::Error::Unauthorized { message } => CoreError::Backend {
            status: Some(401),
            message,
        },
        other => other.into(),
    }
}
