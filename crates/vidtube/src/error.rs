//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use vidtube_config::ConfigError;
use vidtube_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend: {reason}")]
    #[diagnostic(
        code(vidtube::connection_failed),
        help(
            "Check that the backend is running and the API URL is right.\n\
             Try: vidtube health --api-url http://localhost:8000/api/v1"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(vidtube::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Please log in to {action}")]
    #[diagnostic(
        code(vidtube::login_required),
        help(
            "Add a username and password to your profile.\n\
             Run: vidtube config init"
        )
    )]
    LoginRequired { action: String },

    #[error("Session rejected by the backend: {message}")]
    #[diagnostic(
        code(vidtube::auth_failed),
        help("Verify your credentials, then run: vidtube config set-password")
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(vidtube::no_credentials),
        help(
            "Configure credentials with: vidtube config init\n\
             Or set the VIDTUBE_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(vidtube::not_found),
        help("Run: vidtube {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(vidtube::api_error))]
    ApiError {
        status: Option<u16>,
        message: String,
    },

    #[error("{source}")]
    #[diagnostic(
        code(vidtube::batch_failed),
        help("{total} requests were issued together; none of the results are shown.")
    )]
    BatchFailed {
        total: usize,
        #[source]
        source: Box<CliError>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vidtube::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(vidtube::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: vidtube config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(vidtube::config))]
    Config(Box<figment::Error>),

    #[error("Keyring access failed: {0}")]
    #[diagnostic(
        code(vidtube::keyring),
        help("Set VIDTUBE_PASSWORD or store the password in the profile instead.")
    )]
    Keyring(String),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(vidtube::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("The request was abandoned before it completed")]
    #[diagnostic(code(vidtube::cancelled))]
    Cancelled,

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::LoginRequired { .. } | Self::AuthFailed { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ApiError { status, .. } => match status {
                Some(401) => exit_code::AUTH,
                Some(403) => exit_code::PERMISSION,
                Some(404) => exit_code::NOT_FOUND,
                Some(409) => exit_code::CONFLICT,
                _ => exit_code::GENERAL,
            },
            Self::BatchFailed { source, .. } => source.exit_code(),
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

/// The command that lists entities of the given kind.
fn list_command(entity_type: &str) -> String {
    match entity_type {
        "Video" => "videos list".into(),
        "Channel" => "subscriptions".into(),
        "Comment" => "comments <video> list".into(),
        "Playlist" => "playlists list".into(),
        "Tweet" => "tweets list".into(),
        other => format!("{}s list", other.to_lowercase()),
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport { message } => {
                if message == "request timed out" {
                    CliError::Timeout
                } else {
                    CliError::ConnectionFailed { reason: message }
                }
            }

            CoreError::Backend { status, message } => CliError::ApiError { status, message },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: list_command(&entity_type),
                resource_type: entity_type,
                identifier,
            },

            CoreError::BatchFailed { total, source } => CliError::BatchFailed {
                total,
                source: Box::new(CliError::from(*source)),
            },

            CoreError::Unauthenticated { action } => CliError::LoginRequired { action },

            CoreError::SessionExpired { message } => CliError::AuthFailed { message },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Cancelled => CliError::Cancelled,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Keyring(e) => CliError::Keyring(e.to_string()),
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
