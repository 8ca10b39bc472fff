// Domain API client
//
// One inherent method per remote operation. Resource groups live in
// their own files (users, videos, comments, ...) to keep this module
// focused on construction.

use url::Url;

use crate::error::Error;
use crate::http::HttpClient;
use crate::transport::TransportConfig;

/// Typed client for the vidtube REST API.
///
/// Holds no cache: every call goes to the backend, and each returns a
/// freshly decoded snapshot. Errors from the adapter are returned as-is.
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Create a client from a base URL (e.g. `http://localhost:8000/api/v1`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: HttpClient::new(base_url, transport)?,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http: HttpClient::with_client(http, base_url),
        }
    }

    /// The underlying adapter, for wire-level access to raw replies.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        self.http.base_url()
    }
}

/// Percent-encode a single path segment (ids, usernames).
///
/// A literal `+` is escaped as `%2B`, so any `+` left is a space.
pub(crate) fn segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}
