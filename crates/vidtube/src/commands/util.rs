//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use secrecy::SecretString;
use vidtube_api::{FilePart, OwnerRef};
use vidtube_core::CoreError;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Read a password from the terminal without echo.
pub fn prompt_secret(prompt: &str) -> Result<SecretString, CliError> {
    let value = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    Ok(SecretString::from(value))
}

/// Load a file for a multipart upload.
pub async fn read_file(path: &Path) -> Result<FilePart, CliError> {
    FilePart::from_path(path)
        .await
        .map_err(|e| CliError::from(CoreError::from(e)))
}

/// Username of an owner reference, falling back to its id.
pub fn owner_name(owner: Option<&OwnerRef>) -> String {
    owner
        .map(|o| o.username().unwrap_or(o.id()).to_owned())
        .unwrap_or_default()
}
