// HTTP client adapter
//
// Wraps `reqwest::Client` with the fixed backend base URL, the shared
// session cookie jar, and request/response logging. Every failure is
// logged here and handed back to the caller untouched; deciding what to
// do about an expired session is left to the layers above.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, error, warn};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error body shape shared by every backend endpoint.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// A successful reply, before any endpoint-specific decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    /// Parsed JSON body; an empty body is `Value::Null`.
    pub body: serde_json::Value,
}

/// Verb-based HTTP adapter bound to one backend base URL.
///
/// Cheap to share behind an `Arc`; the cookie jar holding the session
/// lives inside the wrapped `reqwest::Client`.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    cookie_jar: Option<Arc<Jar>>,
}

impl HttpClient {
    /// Create an adapter from a `TransportConfig`.
    ///
    /// If the config doesn't carry a cookie jar, one is created so the
    /// session cookie can be read back with [`cookie_header`](Self::cookie_header).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages cookies).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session `Cookie` header value currently held for the backend.
    pub fn cookie_header(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append an absolute API path (e.g. `/users/login`) to the base URL.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        let request = self.http.get(url).query(query);
        self.execute(Method::GET, path, request).await
    }

    pub async fn post(&self, path: &str) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        self.execute(Method::POST, path, self.http.post(url)).await
    }

    pub async fn post_json<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        let request = self.http.post(url).json(body);
        self.execute(Method::POST, path, request).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        let request = self.http.post(url).multipart(form);
        self.execute(Method::POST, path, request).await
    }

    pub async fn patch(&self, path: &str) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        self.execute(Method::PATCH, path, self.http.patch(url)).await
    }

    pub async fn patch_json<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        let request = self.http.patch(url).json(body);
        self.execute(Method::PATCH, path, request).await
    }

    pub async fn patch_multipart(&self, path: &str, form: Form) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        let request = self.http.patch(url).multipart(form);
        self.execute(Method::PATCH, path, request).await
    }

    pub async fn delete(&self, path: &str) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        self.execute(Method::DELETE, path, self.http.delete(url)).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<RawResponse, Error> {
        debug!(%method, path, "request");

        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!(%method, path, error = %e, "no response received");
                return Err(Error::Transport(e));
            }
        };

        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                error!(%method, path, status = status.as_u16(), error = %e, "failed to read body");
                return Err(Error::Transport(e));
            }
        };

        if status.is_success() {
            debug!(%method, path, status = status.as_u16(), "response");
            let body = parse_body(&text)?;
            return Ok(RawResponse {
                method,
                path: path.to_owned(),
                status,
                body,
            });
        }

        error!(
            %method,
            path,
            status = status.as_u16(),
            body = %preview(&text),
            "request failed"
        );

        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_owned());

        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, path, "authentication required or session expired");
            return Err(Error::Unauthorized { message });
        }

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn parse_body(text: &str) -> Result<serde_json::Value, Error> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(text).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(text)),
        body: text.to_owned(),
    })
}

fn preview(text: &str) -> String {
    text.chars().take(200).collect()
}
