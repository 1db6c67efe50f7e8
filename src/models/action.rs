//! UI actions posted by embedded resources and their typed payloads.
//!
//! An [`Action`] carries a type tag and an opaque JSON payload. The payload
//! only gains a shape once decoded against the tag, either through
//! [`Action::parse_payload`] (tag discovered at runtime) or one of the
//! narrow accessors such as [`Action::tool_payload`] (tag known up front).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::validate_http_url;
use crate::{AppError, Result};

/// Closed set of action type tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Execute a tool on the MCP server.
    #[serde(rename = "tool")]
    Tool,
    /// Signal a user intent for the model to interpret.
    #[serde(rename = "intent")]
    Intent,
    /// Send a prompt into the conversation.
    #[serde(rename = "prompt")]
    Prompt,
    /// Show a notification to the host.
    #[serde(rename = "notify")]
    Notify,
    /// Open an external link.
    #[serde(rename = "link")]
    Link,
    /// Report a change in rendered UI size.
    #[serde(rename = "ui-size-change")]
    UiSizeChange,
}

impl ActionType {
    /// All action types, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Tool,
        Self::Intent,
        Self::Prompt,
        Self::Notify,
        Self::Link,
        Self::UiSizeChange,
    ];

    /// Wire tag for this action type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Intent => "intent",
            Self::Prompt => "prompt",
            Self::Notify => "notify",
            Self::Link => "link",
            Self::UiSizeChange => "ui-size-change",
        }
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::UnknownAction(s.to_owned()))
    }
}

/// A user interaction forwarded from an embedded UI resource.
///
/// `action_type` is kept as the raw wire string so that actions with an
/// unrecognised tag still deserialize and fail later, at parse time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Wire type tag (`tool`, `intent`, `prompt`, `notify`, `link`, `ui-size-change`).
    #[serde(rename = "type")]
    pub action_type: String,
    /// Correlation identifier for asynchronous responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Tag-specific payload, undecoded.
    #[serde(default)]
    pub payload: Value,
}

/// Payload of a `tool` action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolPayload {
    /// Name of the tool to call.
    pub tool_name: String,
    /// Tool arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

/// Payload of an `intent` action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntentPayload {
    /// Intent identifier.
    pub intent: String,
    /// Optional intent parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

/// Payload of a `prompt` action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptPayload {
    /// Text to send to the model.
    pub prompt: String,
}

/// Payload of a `notify` action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifyPayload {
    /// Notification text.
    pub message: String,
    /// Optional severity (`info`, `warning`, `error`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Payload of a `link` action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkPayload {
    /// External URL to open.
    pub url: String,
}

impl LinkPayload {
    /// Check that the URL is absolute `http`/`https` with a host.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` describing the first failed rule.
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.url)
    }
}

/// Payload of a `ui-size-change` action.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiSizePayload {
    /// New height in pixels.
    pub height: i64,
    /// New width in pixels, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

/// A payload decoded against its action tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
    /// `tool` payload.
    Tool(ToolPayload),
    /// `intent` payload.
    Intent(IntentPayload),
    /// `prompt` payload.
    Prompt(PromptPayload),
    /// `notify` payload.
    Notify(NotifyPayload),
    /// `link` payload.
    Link(LinkPayload),
    /// `ui-size-change` payload.
    UiSize(UiSizePayload),
}

impl ActionPayload {
    /// Tag this payload belongs to.
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::Tool(_) => ActionType::Tool,
            Self::Intent(_) => ActionType::Intent,
            Self::Prompt(_) => ActionType::Prompt,
            Self::Notify(_) => ActionType::Notify,
            Self::Link(_) => ActionType::Link,
            Self::UiSize(_) => ActionType::UiSizeChange,
        }
    }
}

impl Action {
    /// Resolve the wire tag against the closed [`ActionType`] set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownAction` for a tag outside the set.
    pub fn kind(&self) -> Result<ActionType> {
        self.action_type.parse()
    }

    /// Decode the payload into the record its tag names.
    ///
    /// # Errors
    ///
    /// - `AppError::UnknownAction` for an unrecognised tag.
    /// - `AppError::Decode` naming the tag when the payload is malformed.
    /// - `AppError::Validation` for a `link` payload whose URL is rejected.
    pub fn parse_payload(&self) -> Result<ActionPayload> {
        let kind = self.kind()?;
        let payload = match kind {
            ActionType::Tool => ActionPayload::Tool(self.decode(kind)?),
            ActionType::Intent => ActionPayload::Intent(self.decode(kind)?),
            ActionType::Prompt => ActionPayload::Prompt(self.decode(kind)?),
            ActionType::Notify => ActionPayload::Notify(self.decode(kind)?),
            ActionType::Link => {
                let link: LinkPayload = self.decode(kind)?;
                link.validate()?;
                ActionPayload::Link(link)
            }
            ActionType::UiSizeChange => ActionPayload::UiSize(self.decode(kind)?),
        };
        Ok(payload)
    }

    /// Decode the payload as a [`ToolPayload`].
    ///
    /// # Errors
    ///
    /// `AppError::TypeMismatch` if the tag is not `tool`; `AppError::Decode`
    /// on a malformed payload.
    pub fn tool_payload(&self) -> Result<ToolPayload> {
        self.expect_kind(ActionType::Tool)?;
        self.decode(ActionType::Tool)
    }

    /// Decode the payload as an [`IntentPayload`].
    ///
    /// # Errors
    ///
    /// `AppError::TypeMismatch` if the tag is not `intent`; `AppError::Decode`
    /// on a malformed payload.
    pub fn intent_payload(&self) -> Result<IntentPayload> {
        self.expect_kind(ActionType::Intent)?;
        self.decode(ActionType::Intent)
    }

    /// Decode the payload as a [`PromptPayload`].
    ///
    /// # Errors
    ///
    /// `AppError::TypeMismatch` if the tag is not `prompt`; `AppError::Decode`
    /// on a malformed payload.
    pub fn prompt_payload(&self) -> Result<PromptPayload> {
        self.expect_kind(ActionType::Prompt)?;
        self.decode(ActionType::Prompt)
    }

    /// Decode the payload as a [`NotifyPayload`].
    ///
    /// # Errors
    ///
    /// `AppError::TypeMismatch` if the tag is not `notify`; `AppError::Decode`
    /// on a malformed payload.
    pub fn notify_payload(&self) -> Result<NotifyPayload> {
        self.expect_kind(ActionType::Notify)?;
        self.decode(ActionType::Notify)
    }

    /// Decode and validate the payload as a [`LinkPayload`].
    ///
    /// # Errors
    ///
    /// `AppError::TypeMismatch` if the tag is not `link`; `AppError::Decode`
    /// on a malformed payload; `AppError::Validation` on a rejected URL.
    pub fn link_payload(&self) -> Result<LinkPayload> {
        self.expect_kind(ActionType::Link)?;
        let link: LinkPayload = self.decode(ActionType::Link)?;
        link.validate()?;
        Ok(link)
    }

    /// Decode the payload as a [`UiSizePayload`].
    ///
    /// # Errors
    ///
    /// `AppError::TypeMismatch` if the tag is not `ui-size-change`;
    /// `AppError::Decode` on a malformed payload.
    pub fn ui_size_payload(&self) -> Result<UiSizePayload> {
        self.expect_kind(ActionType::UiSizeChange)?;
        self.decode(ActionType::UiSizeChange)
    }

    /// Fail fast unless the wire tag equals `expected`.
    pub(crate) fn expect_kind(&self, expected: ActionType) -> Result<()> {
        if self.action_type == expected.as_str() {
            Ok(())
        } else {
            Err(AppError::TypeMismatch(format!(
                "expected {expected} action, got {}",
                self.action_type
            )))
        }
    }

    fn decode<T: DeserializeOwned>(&self, kind: ActionType) -> Result<T> {
        T::deserialize(&self.payload)
            .map_err(|err| AppError::Decode(format!("invalid {kind} payload: {err}")))
    }

    // ── Constructors ─────────────────────────────────────────

    /// Build a `tool` action.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Encode` if the payload cannot be serialized.
    pub fn tool(
        message_id: Option<String>,
        tool_name: impl Into<String>,
        params: Option<Map<String, Value>>,
    ) -> Result<Self> {
        Self::with_payload(
            ActionType::Tool,
            message_id,
            &ToolPayload {
                tool_name: tool_name.into(),
                params,
            },
        )
    }

    /// Build an `intent` action.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Encode` if the payload cannot be serialized.
    pub fn intent(
        message_id: Option<String>,
        intent: impl Into<String>,
        params: Option<Map<String, Value>>,
    ) -> Result<Self> {
        Self::with_payload(
            ActionType::Intent,
            message_id,
            &IntentPayload {
                intent: intent.into(),
                params,
            },
        )
    }

    /// Build a `prompt` action.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Encode` if the payload cannot be serialized.
    pub fn prompt(message_id: Option<String>, prompt: impl Into<String>) -> Result<Self> {
        Self::with_payload(
            ActionType::Prompt,
            message_id,
            &PromptPayload {
                prompt: prompt.into(),
            },
        )
    }

    /// Build a `notify` action. Notifications carry no message id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Encode` if the payload cannot be serialized.
    pub fn notify(message: impl Into<String>, level: Option<String>) -> Result<Self> {
        Self::with_payload(
            ActionType::Notify,
            None,
            &NotifyPayload {
                message: message.into(),
                level,
            },
        )
    }

    /// Build a `link` action after validating the URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the URL is not absolute
    /// `http`/`https` with a host.
    pub fn link(url: impl Into<String>) -> Result<Self> {
        let payload = LinkPayload { url: url.into() };
        payload.validate()?;
        Self::with_payload(ActionType::Link, None, &payload)
    }

    /// Build a `ui-size-change` action.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Encode` if the payload cannot be serialized.
    pub fn ui_size(height: i64, width: Option<i64>) -> Result<Self> {
        Self::with_payload(
            ActionType::UiSizeChange,
            None,
            &UiSizePayload { height, width },
        )
    }

    fn with_payload<T: Serialize>(
        kind: ActionType,
        message_id: Option<String>,
        payload: &T,
    ) -> Result<Self> {
        let payload = serde_json::to_value(payload)
            .map_err(|err| AppError::Encode(format!("invalid {kind} payload: {err}")))?;
        Ok(Self {
            action_type: kind.as_str().to_owned(),
            message_id,
            payload,
        })
    }
}
