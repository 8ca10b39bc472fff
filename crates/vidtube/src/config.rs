//! CLI configuration: thin wrapper around `vidtube_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --insecure, --timeout).

use std::time::Duration;

use vidtube_core::{ClientConfig, Credentials, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use vidtube_config::{Config, Profile, config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The active profile, or an empty one when the config has none by that
/// name and no `--profile` was asked for explicitly.
pub fn active_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    match config.profiles.get(&name) {
        Some(profile) => Ok((name, profile.clone())),
        None if global.profile.is_none() => Ok((name, Profile::default())),
        None => {
            let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            })
        }
    }
}

/// Translate a profile + global flags into a `ClientConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn client_config(
    profile: &Profile,
    config: &Config,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut client = vidtube_config::profile_to_client_config(profile, &config.defaults)?;

    if let Some(ref raw) = global.api_url {
        client.base_url = raw.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        client.timeout = Duration::from_secs(secs);
    }
    Ok(client)
}

/// Sign-in credentials for the profile, if it has any.
///
/// A profile with no username or email is anonymous; a profile with a
/// login name but no password anywhere is an error.
pub fn credentials(profile: &Profile, profile_name: &str) -> Result<Option<Credentials>, CliError> {
    if profile.username.is_none() && profile.email.is_none() {
        return Ok(None);
    }
    Ok(Some(vidtube_config::resolve_credentials(profile, profile_name)?))
}
