//! UI resource descriptors and URI-addressed resource contents.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};

use crate::codec::{self, WireContent};
use crate::models::content::{Annotations, UiContent};
use crate::validation::validate_ui_uri;
use crate::{AppError, Result};

/// An interactive UI resource listed by a server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiResource {
    /// Unique identifier, e.g. `ui://dashboard/main`.
    pub uri: String,
    /// Programmatic name.
    pub name: String,
    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// What the resource represents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type of the resource, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

impl UiResource {
    /// Check that the URI is present and uses `ui://`, and the name is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` naming the first failed rule.
    pub fn validate(&self) -> Result<()> {
        validate_ui_uri("UiResource URI", &self.uri)?;
        if self.name.is_empty() {
            return Err(AppError::Validation("UiResource name is missing".into()));
        }
        Ok(())
    }
}

/// A template describing a family of UI resources (RFC 6570 URI template).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiResourceTemplate {
    /// URI template, e.g. `ui://weather/{city}`.
    pub uri_template: String,
    /// Programmatic name.
    pub name: String,
    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// What resources matching this template represent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type of matching resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

impl UiResourceTemplate {
    /// Check that the template uses `ui://` and the name is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` naming the first failed rule.
    pub fn validate(&self) -> Result<()> {
        validate_ui_uri("UiResourceTemplate URI template", &self.uri_template)?;
        if self.name.is_empty() {
            let msg = "UiResourceTemplate name is missing";
            return Err(AppError::Validation(msg.into()));
        }
        Ok(())
    }
}

/// Contents of one UI resource as sent in a `resources/read` result.
///
/// At most one of `text` and `blob` is set. A zero-length blob built from
/// [`BlobContent`](crate::models::content::BlobContent) leaves both unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "WireResourceContents")]
pub struct ResourceContents {
    /// Resource identifier.
    pub uri: String,
    /// MIME type of the body.
    pub mime_type: String,
    /// Textual body (HTML, URL, or script).
    pub text: Option<String>,
    /// Binary body, base64-encoded on the wire.
    pub blob: Option<Vec<u8>>,
    /// Optional metadata.
    pub annotations: Option<Annotations>,
}

impl ResourceContents {
    /// Construct resource contents, rejecting an empty URI or a body that
    /// sets both `text` and `blob`.
    ///
    /// Contents with neither body are accepted. Empty text is kept as
    /// `Some("")` but left out of the wire form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the invariant does not hold.
    pub fn new(
        uri: impl Into<String>,
        mime_type: impl Into<String>,
        text: Option<String>,
        blob: Option<Vec<u8>>,
        annotations: Option<Annotations>,
    ) -> Result<Self> {
        let contents = Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
            text,
            blob,
            annotations,
        };
        contents.validate()?;
        Ok(contents)
    }

    /// Build resource contents for `uri` from content that may be absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if `uri` is empty or `content` is
    /// `None`.
    pub fn build(uri: impl Into<String>, content: Option<&UiContent>) -> Result<Self> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(AppError::Validation("URI is required".into()));
        }
        let Some(content) = content else {
            return Err(AppError::Validation("content is required".into()));
        };
        Self::from_content(uri, content)
    }

    /// Build resource contents for `uri` from a content variant.
    ///
    /// The content is encoded first; a non-empty wire blob becomes `blob`,
    /// anything else routes the wire text into `text`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if `uri` is empty.
    pub fn from_content(uri: impl Into<String>, content: &UiContent) -> Result<Self> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(AppError::Validation("URI is required".into()));
        }

        let wire = codec::encode(content);
        let mut contents = Self {
            uri,
            mime_type: wire.mime_type,
            text: None,
            blob: None,
            annotations: wire.annotations,
        };

        match wire.blob {
            Some(encoded) if !encoded.is_empty() => {
                contents.blob = Some(STANDARD.decode(encoded.as_bytes())?);
            }
            _ => contents.text = wire.text,
        }

        Ok(contents)
    }

    /// Rebuild the content variant these contents were built from.
    ///
    /// # Errors
    ///
    /// Propagates [`codec::decode`] failures, e.g. an unknown MIME type.
    pub fn to_content(&self) -> Result<UiContent> {
        codec::decode(WireContent {
            mime_type: self.mime_type.clone(),
            text: self.text.clone(),
            blob: self.blob.as_ref().map(|data| STANDARD.encode(data)),
            annotations: self.annotations.clone(),
        })
    }

    /// Check the URI and text/blob exclusivity invariants. Having no body
    /// at all is valid.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` describing the violation.
    pub fn validate(&self) -> Result<()> {
        if self.uri.is_empty() {
            return Err(AppError::Validation("ResourceContents missing URI".into()));
        }
        if self.text.is_some() && self.blob.is_some() {
            let msg = "ResourceContents has both text and blob set";
            return Err(AppError::Validation(msg.into()));
        }
        Ok(())
    }
}

/// Wire form of [`ResourceContents`]; `blob` is present whenever a blob is
/// set, even when empty.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResourceContents {
    uri: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotations: Option<Annotations>,
}

impl Serialize for ResourceContents {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.validate().map_err(S::Error::custom)?;

        WireResourceContents {
            uri: self.uri.clone(),
            mime_type: self.mime_type.clone(),
            text: self.text.clone().filter(|text| !text.is_empty()),
            blob: self.blob.as_ref().map(|data| STANDARD.encode(data)),
            annotations: self.annotations.clone(),
        }
        .serialize(serializer)
    }
}

impl TryFrom<WireResourceContents> for ResourceContents {
    type Error = AppError;

    fn try_from(wire: WireResourceContents) -> Result<Self> {
        let blob = wire
            .blob
            .map(|encoded| STANDARD.decode(encoded.as_bytes()))
            .transpose()?;
        Self::new(wire.uri, wire.mime_type, wire.text, blob, wire.annotations)
    }
}

/// Result of reading a UI resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReadUiResourceResult {
    /// Contents of the resource.
    pub contents: Vec<ResourceContents>,
}

/// Result of listing UI resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListUiResourcesResult {
    /// Available UI resources.
    pub resources: Vec<UiResource>,
    /// Opaque pagination token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
