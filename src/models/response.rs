//! Response envelopes sent from host to embedded UI.
//!
//! A response is in exactly one of three states: an acknowledgment that an
//! action was received, a success carrying an optional value, or an error.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::AppError;

/// Wire tag for an acknowledgment.
pub const RESPONSE_TYPE_RECEIVED: &str = "ui-message-received";

/// Wire tag for a processed-action response.
pub const RESPONSE_TYPE_RESPONSE: &str = "ui-message-response";

/// Wire-level response type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResponseType {
    /// `ui-message-received`.
    #[serde(rename = "ui-message-received")]
    Received,
    /// `ui-message-response`.
    #[serde(rename = "ui-message-response")]
    Response,
}

/// Structured error reported to the embedded UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseError {
    /// Human-readable description.
    pub message: String,
    /// Optional machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Additional context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseError {
    /// Error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            data: None,
        }
    }
}

impl Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(ref code) => write!(f, "{code}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// State of a response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Receipt acknowledged; no payload.
    Received,
    /// Action processed; `None` is a no-op success.
    Success(Option<Value>),
    /// Action failed.
    Error(ResponseError),
}

/// Envelope correlating a response to the action that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub struct UiResponse {
    /// Message id of the originating action.
    pub message_id: String,
    /// Response state.
    pub body: ResponseBody,
}

impl UiResponse {
    /// Acknowledge receipt of an action. Send before processing starts.
    #[must_use]
    pub fn received(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            body: ResponseBody::Received,
        }
    }

    /// Report a processed action with its result value.
    ///
    /// A `null` value is the same as no value: the payload is sent empty.
    #[must_use]
    pub fn success(message_id: impl Into<String>, response: Value) -> Self {
        Self {
            message_id: message_id.into(),
            body: ResponseBody::Success(non_null(response)),
        }
    }

    /// Report a failed action using the error's display text as the message.
    #[must_use]
    pub fn error<E: Display + ?Sized>(message_id: impl Into<String>, err: &E) -> Self {
        Self::from_error(message_id, ResponseError::new(err.to_string()))
    }

    /// Report a failed action with a machine-readable code.
    #[must_use]
    pub fn error_with_code(
        message_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::from_error(
            message_id,
            ResponseError {
                message: message.into(),
                code: Some(code.into()),
                data: None,
            },
        )
    }

    /// Report a failed action with additional context data.
    #[must_use]
    pub fn error_with_data<E: Display + ?Sized>(
        message_id: impl Into<String>,
        err: &E,
        data: Value,
    ) -> Self {
        Self::from_error(
            message_id,
            ResponseError {
                message: err.to_string(),
                code: None,
                data: Some(data),
            },
        )
    }

    /// Report a failed action with a prepared error object.
    #[must_use]
    pub fn from_error(message_id: impl Into<String>, error: ResponseError) -> Self {
        Self {
            message_id: message_id.into(),
            body: ResponseBody::Error(error),
        }
    }

    /// Wire-level type of this envelope.
    #[must_use]
    pub fn response_type(&self) -> ResponseType {
        match self.body {
            ResponseBody::Received => ResponseType::Received,
            ResponseBody::Success(_) | ResponseBody::Error(_) => ResponseType::Response,
        }
    }

    /// Acknowledgments and successes are both successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.is_error()
    }

    /// Whether this envelope reports a failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.body, ResponseBody::Error(_))
    }

    /// Error object, if this is an error response.
    #[must_use]
    pub fn error_details(&self) -> Option<&ResponseError> {
        match self.body {
            ResponseBody::Error(ref err) => Some(err),
            _ => None,
        }
    }

    /// Result value, if this is a success response carrying one.
    #[must_use]
    pub fn response(&self) -> Option<&Value> {
        match self.body {
            ResponseBody::Success(ref value) => value.as_ref(),
            _ => None,
        }
    }
}

/// Payload of a `ui-message-response` envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponsePayload {
    /// Result value on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Error object on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

/// Flat wire form of [`UiResponse`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(rename = "type")]
    response_type: ResponseType,
    #[serde(default)]
    message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<ResponsePayload>,
}

impl From<UiResponse> for WireResponse {
    fn from(response: UiResponse) -> Self {
        let response_type = response.response_type();
        let payload = match response.body {
            ResponseBody::Received => None,
            ResponseBody::Success(value) => Some(ResponsePayload {
                response: value.and_then(non_null),
                error: None,
            }),
            ResponseBody::Error(error) => Some(ResponsePayload {
                response: None,
                error: Some(error),
            }),
        };
        Self {
            response_type,
            message_id: response.message_id,
            payload,
        }
    }
}

fn non_null(value: Value) -> Option<Value> {
    Some(value).filter(|v| !v.is_null())
}

impl TryFrom<WireResponse> for UiResponse {
    type Error = AppError;

    fn try_from(wire: WireResponse) -> Result<Self, AppError> {
        let body = match (wire.response_type, wire.payload) {
            (ResponseType::Received, None) => ResponseBody::Received,
            (ResponseType::Received, Some(_)) => {
                return Err(AppError::Validation(format!(
                    "{RESPONSE_TYPE_RECEIVED} must not carry a payload"
                )));
            }
            (ResponseType::Response, None) => ResponseBody::Success(None),
            (ResponseType::Response, Some(payload)) => match payload.error {
                Some(error) => ResponseBody::Error(error),
                None => ResponseBody::Success(payload.response),
            },
        };
        Ok(Self {
            message_id: wire.message_id,
            body,
        })
    }
}
