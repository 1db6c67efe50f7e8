//! Content codec between [`UiContent`] variants and the shared wire envelope.
//!
//! Every variant travels as `{mimeType, text?, blob?, annotations?}`. The
//! MIME type selects the variant on decode:
//!
//! | MIME type | variant | body |
//! |---|---|---|
//! | `text/html` (exact) | [`UiContent::Html`] | `text` |
//! | `text/uri-list` (exact) | [`UiContent::Url`] | `text` |
//! | `application/vnd.mcp-ui.remote-dom…` (prefix) | [`UiContent::RemoteDom`] | `text` |
//! | anything else with a `blob` field | [`UiContent::Blob`] | `blob` (base64) |
//!
//! The remote-DOM framework rides in the MIME type as a `; framework=<tag>`
//! parameter.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::models::content::{
    Annotations, BlobContent, Framework, HtmlContent, RemoteDomContent, UiContent, UrlContent,
    MIME_TYPE_HTML, MIME_TYPE_REMOTE_DOM, MIME_TYPE_URL_LIST,
};
use crate::{AppError, Result};

/// MIME parameter carrying the remote-DOM framework tag.
const FRAMEWORK_PARAM: &str = "framework=";

/// Wire envelope shared by all content variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WireContent {
    /// MIME type selecting the variant.
    pub mime_type: String,
    /// Textual body (HTML, URL, or script).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64-encoded binary body; `Some("")` for a zero-length blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

/// Encode a content variant into its wire envelope.
#[must_use]
pub fn encode(content: &UiContent) -> WireContent {
    match content {
        UiContent::Html(c) => WireContent {
            mime_type: MIME_TYPE_HTML.to_owned(),
            text: Some(c.html.clone()),
            blob: None,
            annotations: c.annotations.clone(),
        },
        UiContent::Url(c) => WireContent {
            mime_type: MIME_TYPE_URL_LIST.to_owned(),
            text: Some(c.url.clone()),
            blob: None,
            annotations: c.annotations.clone(),
        },
        UiContent::RemoteDom(c) => WireContent {
            mime_type: c.mime_type(),
            text: Some(c.script.clone()),
            blob: None,
            annotations: c.annotations.clone(),
        },
        UiContent::Blob(c) => WireContent {
            mime_type: c.mime_type.clone(),
            text: None,
            blob: Some(STANDARD.encode(&c.data)),
            annotations: c.annotations.clone(),
        },
    }
}

/// Decode a wire envelope into the content variant its MIME type names.
///
/// # Errors
///
/// - `AppError::Decode` if a blob is not valid base64.
/// - `AppError::Validation` if a remote-DOM framework tag is unsupported.
/// - `AppError::UnknownMimeType` if no variant matches and no blob is present.
pub fn decode(wire: WireContent) -> Result<UiContent> {
    let WireContent {
        mime_type,
        text,
        blob,
        annotations,
    } = wire;

    if mime_type == MIME_TYPE_HTML {
        return Ok(UiContent::Html(HtmlContent {
            html: text.unwrap_or_default(),
            annotations,
        }));
    }

    if mime_type == MIME_TYPE_URL_LIST {
        return Ok(UiContent::Url(UrlContent {
            url: text.unwrap_or_default(),
            annotations,
        }));
    }

    if mime_type.starts_with(MIME_TYPE_REMOTE_DOM) {
        let framework = parse_framework(&mime_type)?;
        return Ok(UiContent::RemoteDom(RemoteDomContent {
            script: text.unwrap_or_default(),
            framework,
            annotations,
        }));
    }

    match blob {
        Some(encoded) => {
            let data = STANDARD.decode(encoded.as_bytes())?;
            Ok(UiContent::Blob(BlobContent {
                data,
                mime_type,
                annotations,
            }))
        }
        None => Err(AppError::UnknownMimeType(mime_type)),
    }
}

/// Extract the `framework=` parameter from a remote-DOM MIME type.
///
/// The value ends at the first `;` or space. An absent or empty value
/// yields `None`.
fn parse_framework(mime_type: &str) -> Result<Option<Framework>> {
    let Some(idx) = mime_type.find(FRAMEWORK_PARAM) else {
        return Ok(None);
    };

    let rest = &mime_type[idx + FRAMEWORK_PARAM.len()..];
    let value = rest.find([';', ' ']).map_or(rest, |end| &rest[..end]);

    if value.is_empty() {
        return Ok(None);
    }

    value.parse().map(Some)
}

impl From<UiContent> for WireContent {
    fn from(content: UiContent) -> Self {
        encode(&content)
    }
}

impl TryFrom<WireContent> for UiContent {
    type Error = AppError;

    fn try_from(wire: WireContent) -> Result<Self> {
        decode(wire)
    }
}
