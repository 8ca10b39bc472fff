//! Client-side data layer between `vidtube-api` and its front ends.
//!
//! - **[`Context`]**: the injectable bundle of API client and session
//!   handed to every view. [`Context::call`] lifts API errors into
//!   [`CoreError`] and expires the session on an `Unauthorized` reply.
//!
//! - **[`Session`]**: the only process-wide mutable state. Rehydrates from
//!   the session cookie, performs login/register/logout, and publishes
//!   every transition through a `tokio::sync::watch` channel.
//!
//! - **[`ToggleControl`]**: optimistic boolean-plus-counter mutations
//!   (likes, subscriptions, publish status) with a single in-flight guard
//!   and two reconciliation policies.
//!
//! - **[`ViewScope`]**: cancellation boundary that keeps late results
//!   from landing in a closed view.
//!
//! - **Page controllers** ([`pages`]): one headless controller per view,
//!   each owning its snapshots.

pub mod config;
pub mod context;
pub mod error;
pub mod pages;
pub mod routes;
pub mod scope;
pub mod session;
pub mod toggle;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use context::Context;
pub use error::{CoreError, ErrorKind};
pub use pages::{
    ChannelPage, ChannelStudio, CommentThread, HomeFeed, PlaylistDetail, PlaylistLibrary,
    ProfilePage, TweetFeed, UploadForm, VideoPlayer, VideoUpload,
};
pub use routes::{Navigator, NoopNavigator, Route, RouteDecision};
pub use scope::ViewScope;
pub use session::{Session, SessionPhase, SessionState};
pub use toggle::{
    LikeToggle, PublishToggle, Reconcile, SubscribeToggle, ToggleControl, ToggleOutcome,
    ToggleState,
};

// Domain types come straight from the API crate.
pub use vidtube_api::{
    ChannelProfile, ChannelStats, Comment, Credentials, FilePart, LikeTarget, Playlist,
    RegisterForm, Tweet, User, Video,
};
