//! Adapters between narrow, payload-specific handler functions and the
//! router's uniform [`ActionHandler`] shape.
//!
//! Each adapter checks the action tag, decodes the typed payload, and calls
//! the wrapped function. A tag mismatch or malformed payload is a dispatch
//! error and the wrapped function never runs. An `Err` from the wrapped
//! function is a business failure and lands in [`ActionResult::error`].

use std::any::Any;
use std::fmt::{Debug, Display, Formatter};
use std::future::{ready, Future};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::action::{Action, ActionType};
use crate::router::{ActionHandler, ActionRequest, ActionResult, HandlerFuture, Session};
use crate::{AppError, Result};

/// Response sent when a notify or size-change handler succeeds.
pub const ACKNOWLEDGED: &str = "acknowledged";

/// Response sent when a link handler succeeds.
pub const OPENED: &str = "opened";

/// Request metadata handed to narrow handlers alongside the payload.
#[derive(Clone, Default)]
pub struct RequestContext {
    /// URI of the originating resource; empty when unknown.
    pub resource_uri: String,
    /// Message id of the action, if any.
    pub message_id: Option<String>,
    /// Opaque session carrier.
    pub session: Option<Session>,
}

impl RequestContext {
    /// Session value downcast to `T`, if present and of that type.
    #[must_use]
    pub fn session<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.session.as_deref().and_then(|s| s.downcast_ref::<T>())
    }
}

impl From<ActionRequest> for RequestContext {
    fn from(request: ActionRequest) -> Self {
        Self {
            resource_uri: request.resource_uri,
            message_id: request.action.and_then(|a| a.message_id),
            session: request.session,
        }
    }
}

impl Debug for RequestContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("resource_uri", &self.resource_uri)
            .field("message_id", &self.message_id)
            .field("session", &self.session.as_ref().map(|_| "<opaque>"))
            .finish()
    }
}

/// Adapt `handler(context, tool_name, params)` for `tool` actions.
#[must_use]
pub fn adapt_tool_handler<F, Fut, T, E>(handler: F) -> ActionHandler
where
    F: Fn(RequestContext, String, Map<String, Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Display + Send + 'static,
{
    Arc::new(move |request: ActionRequest| -> HandlerFuture {
        let payload = match accept(&request, ActionType::Tool, Action::tool_payload) {
            Ok(payload) => payload,
            Err(err) => return Box::pin(ready(Err(err))),
        };
        let pending = handler(
            request.into(),
            payload.tool_name,
            payload.params.unwrap_or_default(),
        );
        Box::pin(async move { respond(ActionType::Tool, pending.await) })
    })
}

/// Adapt `handler(context, intent, params)` for `intent` actions.
#[must_use]
pub fn adapt_intent_handler<F, Fut, T, E>(handler: F) -> ActionHandler
where
    F: Fn(RequestContext, String, Map<String, Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Display + Send + 'static,
{
    Arc::new(move |request: ActionRequest| -> HandlerFuture {
        let payload = match accept(&request, ActionType::Intent, Action::intent_payload) {
            Ok(payload) => payload,
            Err(err) => return Box::pin(ready(Err(err))),
        };
        let pending = handler(
            request.into(),
            payload.intent,
            payload.params.unwrap_or_default(),
        );
        Box::pin(async move { respond(ActionType::Intent, pending.await) })
    })
}

/// Adapt `handler(context, prompt)` for `prompt` actions.
#[must_use]
pub fn adapt_prompt_handler<F, Fut, T, E>(handler: F) -> ActionHandler
where
    F: Fn(RequestContext, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Display + Send + 'static,
{
    Arc::new(move |request: ActionRequest| -> HandlerFuture {
        let payload = match accept(&request, ActionType::Prompt, Action::prompt_payload) {
            Ok(payload) => payload,
            Err(err) => return Box::pin(ready(Err(err))),
        };
        let pending = handler(request.into(), payload.prompt);
        Box::pin(async move { respond(ActionType::Prompt, pending.await) })
    })
}

/// Adapt `handler(context, message, level)` for `notify` actions.
///
/// Success is answered with [`ACKNOWLEDGED`].
#[must_use]
pub fn adapt_notify_handler<F, Fut, E>(handler: F) -> ActionHandler
where
    F: Fn(RequestContext, String, Option<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    Arc::new(move |request: ActionRequest| -> HandlerFuture {
        let payload = match accept(&request, ActionType::Notify, Action::notify_payload) {
            Ok(payload) => payload,
            Err(err) => return Box::pin(ready(Err(err))),
        };
        let pending = handler(request.into(), payload.message, payload.level);
        Box::pin(async move {
            let outcome = pending.await;
            Ok(acknowledge(ActionType::Notify, outcome, ACKNOWLEDGED))
        })
    })
}

/// Adapt `handler(context, url)` for `link` actions.
///
/// The URL is validated before the handler runs. Success is answered with
/// [`OPENED`].
#[must_use]
pub fn adapt_link_handler<F, Fut, E>(handler: F) -> ActionHandler
where
    F: Fn(RequestContext, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    Arc::new(move |request: ActionRequest| -> HandlerFuture {
        let payload = match accept(&request, ActionType::Link, Action::link_payload) {
            Ok(payload) => payload,
            Err(err) => return Box::pin(ready(Err(err))),
        };
        let pending = handler(request.into(), payload.url);
        Box::pin(async move {
            let outcome = pending.await;
            Ok(acknowledge(ActionType::Link, outcome, OPENED))
        })
    })
}

/// Adapt `handler(context, height, width)` for `ui-size-change` actions.
///
/// Success is answered with [`ACKNOWLEDGED`].
#[must_use]
pub fn adapt_ui_size_handler<F, Fut, E>(handler: F) -> ActionHandler
where
    F: Fn(RequestContext, i64, Option<i64>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    Arc::new(move |request: ActionRequest| -> HandlerFuture {
        let payload = match accept(&request, ActionType::UiSizeChange, Action::ui_size_payload) {
            Ok(payload) => payload,
            Err(err) => return Box::pin(ready(Err(err))),
        };
        let pending = handler(request.into(), payload.height, payload.width);
        Box::pin(async move {
            let outcome = pending.await;
            Ok(acknowledge(ActionType::UiSizeChange, outcome, ACKNOWLEDGED))
        })
    })
}

// ── Private helpers ──────────────────────────────────────────────────────────

/// Check the request's tag against `expected` and decode its payload.
fn accept<T>(
    request: &ActionRequest,
    expected: ActionType,
    decode: fn(&Action) -> Result<T>,
) -> Result<T> {
    let Some(action) = request.action.as_ref() else {
        let msg = format!("expected {expected} action, got none");
        return Err(AppError::TypeMismatch(msg));
    };
    action.expect_kind(expected)?;
    decode(action)
}

/// Package a value-returning handler's outcome.
fn respond<T: Serialize, E: Display>(
    kind: ActionType,
    outcome: std::result::Result<T, E>,
) -> Result<ActionResult> {
    match outcome {
        Ok(value) => serde_json::to_value(value)
            .map(ActionResult::success)
            .map_err(|err| AppError::Encode(format!("{kind} handler response: {err}"))),
        Err(err) => {
            warn!(action_type = %kind, %err, "handler reported failure");
            Ok(ActionResult::failure(&err))
        }
    }
}

/// Package a unit-returning handler's outcome with a fixed acknowledgment.
fn acknowledge<E: Display>(
    kind: ActionType,
    outcome: std::result::Result<(), E>,
    ack: &str,
) -> ActionResult {
    match outcome {
        Ok(()) => ActionResult::success(Value::String(ack.to_owned())),
        Err(err) => {
            warn!(action_type = %kind, %err, "handler reported failure");
            ActionResult::failure(&err)
        }
    }
}
