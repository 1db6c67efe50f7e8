//! UI content variants rendered by MCP-UI hosts.
//!
//! Four closed variants share one wire envelope (see [`crate::codec`]):
//! inline HTML, an external URL, a remote-DOM script, and a binary blob.
//!
//! # Security
//!
//! Markup and script content are passed through unvalidated. Hosts must
//! render them in a sandboxed iframe with an appropriate Content Security
//! Policy; servers should sanitize HTML before placing it in a resource.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::WireContent;
use crate::validation::validate_http_url;
use crate::{AppError, Result};

/// MIME type for inline HTML rendered via iframe `srcdoc`.
pub const MIME_TYPE_HTML: &str = "text/html";

/// MIME type for an external URL rendered via iframe `src`.
pub const MIME_TYPE_URL_LIST: &str = "text/uri-list";

/// Base MIME type for remote-DOM script content.
pub const MIME_TYPE_REMOTE_DOM: &str = "application/vnd.mcp-ui.remote-dom";

/// Metadata annotations attached to UI content.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Annotations {
    /// Intended audience for the content (e.g. `user`, `assistant`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audience: Vec<String>,
    /// Relative importance of the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

/// Rendering framework used by a remote-DOM script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// React renderer.
    React,
    /// Web Components renderer.
    WebComponents,
}

impl Framework {
    /// Wire spelling used in the `framework=` MIME parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::WebComponents => "webcomponents",
        }
    }
}

impl Display for Framework {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "react" => Ok(Self::React),
            "webcomponents" => Ok(Self::WebComponents),
            other => Err(AppError::Validation(format!(
                "unsupported remote-dom framework: {other}"
            ))),
        }
    }
}

/// Inline HTML rendered in a sandboxed iframe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlContent {
    /// HTML document or fragment.
    pub html: String,
    /// Optional metadata.
    pub annotations: Option<Annotations>,
}

/// External page loaded into an iframe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlContent {
    /// Absolute `http`/`https` URL.
    pub url: String,
    /// Optional metadata.
    pub annotations: Option<Annotations>,
}

impl UrlContent {
    /// Check that the URL is absolute, uses `http`/`https`, and has a host.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` describing the first failed rule.
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.url)
    }
}

/// Script executed by the host's remote-DOM worker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteDomContent {
    /// JavaScript that constructs the remote DOM tree.
    pub script: String,
    /// Rendering framework, or `None` to let the host choose.
    pub framework: Option<Framework>,
    /// Optional metadata.
    pub annotations: Option<Annotations>,
}

impl RemoteDomContent {
    /// Composite MIME type carrying the framework as a parameter.
    #[must_use]
    pub fn mime_type(&self) -> String {
        let mut mime = format!("{MIME_TYPE_REMOTE_DOM}+javascript");
        if let Some(framework) = self.framework {
            mime.push_str("; framework=");
            mime.push_str(framework.as_str());
        }
        mime
    }
}

/// Binary asset such as an image or font.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlobContent {
    /// Raw bytes; base64-encoded on the wire.
    pub data: Vec<u8>,
    /// Caller-supplied MIME type of the bytes.
    pub mime_type: String,
    /// Optional metadata.
    pub annotations: Option<Annotations>,
}

/// A renderable UI payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireContent", try_from = "WireContent")]
pub enum UiContent {
    /// Inline HTML.
    Html(HtmlContent),
    /// External URL.
    Url(UrlContent),
    /// Remote-DOM script.
    RemoteDom(RemoteDomContent),
    /// Binary blob.
    Blob(BlobContent),
}

impl UiContent {
    /// MIME type this content is encoded under.
    #[must_use]
    pub fn mime_type(&self) -> String {
        match self {
            Self::Html(_) => MIME_TYPE_HTML.to_owned(),
            Self::Url(_) => MIME_TYPE_URL_LIST.to_owned(),
            Self::RemoteDom(c) => c.mime_type(),
            Self::Blob(c) => c.mime_type.clone(),
        }
    }

    /// Annotations attached to this content, if any.
    #[must_use]
    pub fn annotations(&self) -> Option<&Annotations> {
        match self {
            Self::Html(c) => c.annotations.as_ref(),
            Self::Url(c) => c.annotations.as_ref(),
            Self::RemoteDom(c) => c.annotations.as_ref(),
            Self::Blob(c) => c.annotations.as_ref(),
        }
    }
}

impl From<HtmlContent> for UiContent {
    fn from(content: HtmlContent) -> Self {
        Self::Html(content)
    }
}

impl From<UrlContent> for UiContent {
    fn from(content: UrlContent) -> Self {
        Self::Url(content)
    }
}

impl From<RemoteDomContent> for UiContent {
    fn from(content: RemoteDomContent) -> Self {
        Self::RemoteDom(content)
    }
}

impl From<BlobContent> for UiContent {
    fn from(content: BlobContent) -> Self {
        Self::Blob(content)
    }
}
