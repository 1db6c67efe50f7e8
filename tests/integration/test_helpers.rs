//! Shared helpers for router integration tests.

use serde_json::{json, Value};

use mcp_ui_bridge::router::{handler_fn, ActionHandler, ActionRequest, ActionResult};
use mcp_ui_bridge::Action;

/// Handler that always answers with the string `label`.
pub fn constant(label: &'static str) -> ActionHandler {
    handler_fn(move |_request: ActionRequest| async move {
        Ok(ActionResult::success(Value::String(label.to_owned())))
    })
}

/// Action carrying `tag` with an empty payload.
pub fn bare_action(tag: &str) -> Action {
    Action {
        action_type: tag.to_owned(),
        message_id: Some("msg-1".into()),
        payload: json!({}),
    }
}

/// Request for `action` raised by `resource_uri`.
pub fn request(resource_uri: &str, action: Action) -> ActionRequest {
    ActionRequest::new(action, resource_uri)
}
