// ── Runtime client configuration ──
//
// Describes *where* the backend lives and how to reach it. Never touches
// disk: vidtube-config (or a test) builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;
use vidtube_api::{TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development certificates).
    DangerAcceptInvalid,
}

/// Connection settings for one backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, including the `/api/v1` prefix.
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Parse a base URL string.
    pub fn from_url(raw: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(raw)
            .map_err(|e| CoreError::validation(format!("Invalid API URL {raw}: {e}")))?;
        Ok(Self::new(base_url))
    }

    /// The local development backend (`http://localhost:8000/api/v1`).
    pub fn local() -> Result<Self, CoreError> {
        Self::from_url(vidtube_api::DEFAULT_BASE_URL)
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            cookie_jar: None,
        }
    }
}
