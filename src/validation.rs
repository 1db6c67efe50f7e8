//! Shared field validation for URLs and `ui://` resource identifiers.

use url::Url;

use crate::{AppError, Result};

/// URI scheme prefix every UI resource identifier must carry.
pub const URI_SCHEME: &str = "ui://";

/// Validate that `raw` is an absolute `http` or `https` URL with a host.
///
/// # Errors
///
/// Returns `AppError::Validation` if the URL is empty, cannot be parsed,
/// uses another scheme, or has no host.
pub fn validate_http_url(raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(AppError::Validation("URL is required".into()));
    }

    let parsed =
        Url::parse(raw).map_err(|err| AppError::Validation(format!("invalid URL: {err}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::Validation(format!(
                "URL must have http or https scheme, got: {other}"
            )));
        }
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(AppError::Validation("URL must have a host".into())),
    }
}

/// Validate that `uri` is a non-empty identifier under the [`URI_SCHEME`].
///
/// `what` names the field in the error message (e.g. `"UiResource URI"`).
///
/// # Errors
///
/// Returns `AppError::Validation` if `uri` is empty or lacks the prefix.
pub fn validate_ui_uri(what: &str, uri: &str) -> Result<()> {
    if uri.is_empty() {
        return Err(AppError::Validation(format!("{what} is missing")));
    }
    if !uri.starts_with(URI_SCHEME) {
        return Err(AppError::Validation(format!(
            "{what} must start with {URI_SCHEME}"
        )));
    }
    Ok(())
}
