// Backend record and request payload types
//
// Records are point-in-time copies of backend documents. Every field
// beyond the id is defaulted, since the same record comes back with a
// different projection from different endpoints.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

use crate::upload::FilePart;

// ── Records ─────────────────────────────────────────────────────────

/// A platform account, as returned by the user endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "fullName")]
    pub fullname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Compact owner projection embedded in videos, comments and tweets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "fullName")]
    pub fullname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// An owner reference: either a bare id or a populated projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Id(String),
    Populated(Owner),
}

impl OwnerRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated(owner) => &owner.id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Populated(owner) => owner.username.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_file: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub views: u64,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub owner: Option<OwnerRef>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of the public video feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFeed {
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_videos: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub owner: Option<OwnerRef>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub owner: Option<OwnerRef>,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Video ids, in playlist order. Populated entries are reduced to their id.
    #[serde(default, deserialize_with = "ids_or_documents")]
    pub videos: Vec<String>,
    #[serde(default)]
    pub owner: Option<OwnerRef>,
}

impl Playlist {
    pub fn contains(&self, video_id: &str) -> bool {
        self.videos.iter().any(|v| v == video_id)
    }
}

/// Public channel page for a username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default, alias = "fullName")]
    pub fullname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subscribers_count: i64,
    #[serde(default)]
    pub channels_subscribed_to_count: i64,
    #[serde(default, alias = "isSubscribedToMe")]
    pub is_subscribed: bool,
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// Aggregate counters for the signed-in user's channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    #[serde(default)]
    pub total_videos: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub total_subscribers: u64,
    #[serde(default)]
    pub total_likes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub subscriber: Option<OwnerRef>,
    #[serde(default)]
    pub channel: Option<OwnerRef>,
}

/// Result of a toggle endpoint.
///
/// `state` is the server's resulting boolean when the reply carries one
/// (`isLiked` / `isSubscribed`); `None` when the body omits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleReceipt {
    pub state: Option<bool>,
}

// ── Request payloads ────────────────────────────────────────────────

/// Login credentials: username or email plus password.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: SecretString,
}

impl Credentials {
    pub fn username(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: Some(username.into()),
            email: None,
            password,
        }
    }

    pub fn email(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: None,
            email: Some(email.into()),
            password,
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        let mut body = json!({ "password": self.password.expose_secret() });
        if let Some(ref username) = self.username {
            body["username"] = json!(username);
        }
        if let Some(ref email) = self.email {
            body["email"] = json!(email);
        }
        body
    }
}

/// Account creation form, sent as multipart.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub fullname: String,
    pub email: String,
    pub username: String,
    pub password: SecretString,
    pub avatar: Option<FilePart>,
    pub cover_image: Option<FilePart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountUpdate {
    #[serde(rename = "fullName")]
    pub fullname: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub old_password: SecretString,
    pub new_password: SecretString,
}

impl PasswordChange {
    pub(crate) fn to_json(&self) -> serde_json::Value {
        json!({
            "oldPassword": self.old_password.expose_secret(),
            "newPassword": self.new_password.expose_secret(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistDraft {
    pub name: String,
    pub description: String,
}

/// A new video upload. Both files are required by the backend.
#[derive(Debug, Clone)]
pub struct VideoDraft {
    pub title: String,
    pub description: String,
    pub video_file: FilePart,
    pub thumbnail: FilePart,
}

#[derive(Debug, Clone, Default)]
pub struct VideoUpdate {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<FilePart>,
}

/// Feed query parameters for `GET /videos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<String>,
}

impl VideoQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(ref query) = self.query {
            params.push(("query", query.clone()));
        }
        if let Some(ref sort_by) = self.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        if let Some(ref sort_type) = self.sort_type {
            params.push(("sortType", sort_type.clone()));
        }
        if let Some(ref user_id) = self.user_id {
            params.push(("userId", user_id.clone()));
        }
        params
    }
}

// ── Serde helpers ───────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn ids_or_documents<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Id(String),
        Document {
            #[serde(rename = "_id")]
            id: String,
        },
    }

    let entries = Option::<Vec<Entry>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|e| match e {
            Entry::Id(id) | Entry::Document { id } => id,
        })
        .collect())
}
