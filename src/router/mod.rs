//! Priority-tiered router dispatching UI actions to handlers.
//!
//! Handlers are looked up in three tiers, highest priority first:
//!
//! 1. exact resource URI match,
//! 2. action type match,
//! 3. the default handler.
//!
//! Registries sit behind a single [`RwLock`]. Registration takes the write
//! lock; dispatch takes the read lock only while resolving the handler and
//! awaits the handler after the guard is released, so a slow handler never
//! blocks registration or other dispatches.

pub mod adapters;

use std::any::Any;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

use crate::models::action::{Action, ActionType};
use crate::models::response::{ResponseBody, ResponseError, UiResponse};
use crate::{AppError, Result};

/// Opaque per-session value threaded through to handlers untouched.
///
/// Typically an MCP server session or a cancellation token; handlers
/// recover the concrete type with [`ActionRequest::session`].
pub type Session = Arc<dyn Any + Send + Sync>;

/// Boxed future returned by every [`ActionHandler`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<ActionResult>> + Send>>;

/// Uniform handler shape the router dispatches to.
///
/// An `Err` means no result could be produced (a dispatch failure). A
/// handled domain failure is an `Ok` result with [`ActionResult::error`] set.
pub type ActionHandler = Arc<dyn Fn(ActionRequest) -> HandlerFuture + Send + Sync>;

/// Wrap an async closure as an [`ActionHandler`].
#[must_use]
pub fn handler_fn<F, Fut>(handler: F) -> ActionHandler
where
    F: Fn(ActionRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionResult>> + Send + 'static,
{
    Arc::new(move |request| Box::pin(handler(request)))
}

/// An action together with the resource that produced it.
#[derive(Clone, Default)]
pub struct ActionRequest {
    /// The action to process.
    pub action: Option<Action>,
    /// URI of the originating resource; empty when unknown.
    pub resource_uri: String,
    /// Opaque session carrier.
    pub session: Option<Session>,
}

impl ActionRequest {
    /// Request for `action` raised by the resource at `resource_uri`.
    #[must_use]
    pub fn new(action: Action, resource_uri: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            resource_uri: resource_uri.into(),
            session: None,
        }
    }

    /// Attach an opaque session value.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Session value downcast to `T`, if present and of that type.
    #[must_use]
    pub fn session<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.session.as_deref().and_then(|s| s.downcast_ref::<T>())
    }

    /// Wire tag of the carried action, or `""` when absent.
    #[must_use]
    pub fn action_type(&self) -> &str {
        self.action.as_ref().map_or("", |a| a.action_type.as_str())
    }

    /// Message id of the carried action, or `""` when absent.
    #[must_use]
    pub fn message_id(&self) -> &str {
        self.action
            .as_ref()
            .and_then(|a| a.message_id.as_deref())
            .unwrap_or_default()
    }
}

impl Debug for ActionRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRequest")
            .field("action", &self.action)
            .field("resource_uri", &self.resource_uri)
            .field("session", &self.session.as_ref().map(|_| "<opaque>"))
            .finish()
    }
}

/// Outcome of handling an action.
///
/// Both fields empty is a no-op success. When both are set the error wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionResult {
    /// Result value on success.
    pub response: Option<Value>,
    /// Business failure reported by the handler.
    pub error: Option<ResponseError>,
}

impl ActionResult {
    /// Successful result carrying `response`.
    ///
    /// A `null` value carries nothing and is stored as `None`.
    #[must_use]
    pub fn success(response: Value) -> Self {
        Self {
            response: Some(response).filter(|value| !value.is_null()),
            error: None,
        }
    }

    /// Business failure described by `err`'s display text.
    #[must_use]
    pub fn failure<E: Display + ?Sized>(err: &E) -> Self {
        Self {
            response: None,
            error: Some(ResponseError::new(err.to_string())),
        }
    }

    /// Whether the handler reported a business failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Convert into the response envelope for `message_id`.
    ///
    /// A no-op result becomes a success without a value.
    #[must_use]
    pub fn into_response(self, message_id: impl Into<String>) -> UiResponse {
        match self.error {
            Some(error) => UiResponse::from_error(message_id, error),
            None => match self.response {
                Some(value) => UiResponse::success(message_id, value),
                None => UiResponse {
                    message_id: message_id.into(),
                    body: ResponseBody::Success(None),
                },
            },
        }
    }
}

#[derive(Default)]
struct Registry {
    by_type: HashMap<ActionType, ActionHandler>,
    by_resource: HashMap<String, ActionHandler>,
    fallback: Option<ActionHandler>,
}

/// Which registry tier resolved a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Resource,
    Type,
    Fallback,
}

impl Tier {
    fn as_str(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Type => "type",
            Self::Fallback => "default",
        }
    }
}

/// Concurrent registry mapping actions to handlers.
#[derive(Default)]
pub struct Router {
    registry: RwLock<Registry>,
}

impl Router {
    /// Create an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every action tagged `action_type`.
    ///
    /// Replaces any handler previously registered for the same type.
    pub fn handle_type(&self, action_type: ActionType, handler: ActionHandler) {
        let mut registry = self.write();
        if registry.by_type.insert(action_type, handler).is_some() {
            debug!(%action_type, "replaced type handler");
        } else {
            debug!(%action_type, "registered type handler");
        }
    }

    /// Register `handler` for actions raised by the resource at `resource_uri`.
    ///
    /// Matching is by exact string equality. Replaces any previous handler.
    pub fn handle_resource(&self, resource_uri: impl Into<String>, handler: ActionHandler) {
        let resource_uri = resource_uri.into();
        let mut registry = self.write();
        let previous = registry.by_resource.insert(resource_uri.clone(), handler);
        if previous.is_some() {
            debug!(%resource_uri, "replaced resource handler");
        } else {
            debug!(%resource_uri, "registered resource handler");
        }
    }

    /// Set the handler used when no resource or type handler matches.
    pub fn set_default(&self, handler: ActionHandler) {
        let mut registry = self.write();
        if registry.fallback.replace(handler).is_some() {
            debug!("replaced default handler");
        } else {
            debug!("registered default handler");
        }
    }

    /// Route `request` to the highest-priority matching handler and run it.
    ///
    /// # Errors
    ///
    /// - `AppError::NoHandler` naming the action type and resource URI when
    ///   no tier matches.
    /// - Any error the selected handler returns.
    pub async fn dispatch(&self, request: ActionRequest) -> Result<ActionResult> {
        let span = info_span!(
            "dispatch",
            action_type = %request.action_type(),
            resource_uri = %request.resource_uri,
            message_id = %request.message_id(),
        );

        let Some((tier, handler)) = self.resolve(&request) else {
            let _guard = span.enter();
            warn!("no handler matched action");
            return Err(AppError::NoHandler(format!(
                "action type {:?} from resource {:?}",
                request.action_type(),
                request.resource_uri
            )));
        };

        async move {
            debug!(tier = tier.as_str(), "dispatching action");
            let outcome = handler(request).await;
            match outcome {
                Ok(ref result) if result.is_error() => {
                    debug!("handler reported business failure");
                }
                Ok(_) => {}
                Err(ref err) => warn!(%err, "handler failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Expose this router as a handler so it can be nested in another router.
    #[must_use]
    pub fn into_handler(self: Arc<Self>) -> ActionHandler {
        Arc::new(move |request| {
            let router = Arc::clone(&self);
            Box::pin(async move { router.dispatch(request).await })
        })
    }

    /// Resolve the handler for `request` under the read lock.
    fn resolve(&self, request: &ActionRequest) -> Option<(Tier, ActionHandler)> {
        let registry = self.read();

        if !request.resource_uri.is_empty() {
            if let Some(handler) = registry.by_resource.get(&request.resource_uri) {
                return Some((Tier::Resource, Arc::clone(handler)));
            }
        }

        if let Some(kind) = request.action.as_ref().and_then(|a| a.kind().ok()) {
            if let Some(handler) = registry.by_type.get(&kind) {
                return Some((Tier::Type, Arc::clone(handler)));
            }
        }

        registry
            .fallback
            .as_ref()
            .map(|handler| (Tier::Fallback, Arc::clone(handler)))
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Debug for Router {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let registry = self.read();
        let types: Vec<_> = registry.by_type.keys().collect();
        let resources: Vec<_> = registry.by_resource.keys().collect();
        f.debug_struct("Router")
            .field("types", &types)
            .field("resources", &resources)
            .field("has_default", &registry.fallback.is_some())
            .finish()
    }
}
