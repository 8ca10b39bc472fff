// vidtube-api: Async Rust client for the vidtube video platform REST API

pub mod client;
pub mod comments;
pub mod dashboard;
pub mod envelope;
pub mod error;
pub mod healthcheck;
pub mod http;
pub mod likes;
pub mod models;
pub mod playlists;
pub mod subscriptions;
pub mod transport;
pub mod tweets;
pub mod upload;
pub mod users;
pub mod videos;

pub use client::ApiClient;
pub use error::Error;
pub use http::{HttpClient, RawResponse};
pub use likes::LikeTarget;
pub use models::{
    AccountUpdate, ChannelProfile, ChannelStats, Comment, Credentials, OwnerRef, PasswordChange,
    Playlist, PlaylistDraft, RegisterForm, Subscription, ToggleReceipt, Tweet, User, Video,
    VideoDraft, VideoFeed, VideoQuery, VideoUpdate,
};
pub use transport::{TlsMode, TransportConfig};
pub use upload::{FilePart, ProgressFn, UploadProgress};

/// Default backend base URL (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
