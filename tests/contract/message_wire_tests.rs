//! Contract tests for action and response envelopes exchanged with embedded UIs.

use serde_json::{json, Value};

use mcp_ui_bridge::models::action::{Action, ActionType};
use mcp_ui_bridge::models::response::{ResponseBody, UiResponse};
use mcp_ui_bridge::router::ActionResult;

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("serialize")
}

// ── Actions ──────────────────────────────────────────────────

#[test]
fn tool_action_parses() {
    let action: Action = serde_json::from_value(json!({
        "type": "tool",
        "messageId": "msg-1",
        "payload": {"toolName": "get_status", "params": {"verbose": true}},
    }))
    .expect("deserialize");

    assert_eq!(action.kind(), Ok(ActionType::Tool));
    assert_eq!(action.message_id.as_deref(), Some("msg-1"));
    let tool = action.tool_payload().expect("tool payload");
    assert_eq!(tool.tool_name, "get_status");
}

#[test]
fn unknown_action_tag_still_deserializes() {
    let action: Action =
        serde_json::from_value(json!({"type": "bogus", "payload": {}})).expect("deserialize");
    assert!(action.parse_payload().is_err());
}

#[test]
fn action_without_message_id_omits_key() {
    let action = Action::notify("saved", None).expect("build");
    assert_eq!(
        to_json(&action),
        json!({"type": "notify", "payload": {"message": "saved"}})
    );
}

// ── Responses ────────────────────────────────────────────────

#[test]
fn received_shape() {
    assert_eq!(
        to_json(&UiResponse::received("msg-1")),
        json!({"type": "ui-message-received", "messageId": "msg-1"})
    );
}

#[test]
fn success_shape() {
    assert_eq!(
        to_json(&UiResponse::success("msg-1", json!({"status": "ok"}))),
        json!({
            "type": "ui-message-response",
            "messageId": "msg-1",
            "payload": {"response": {"status": "ok"}},
        })
    );
}

#[test]
fn error_shape() {
    assert_eq!(
        to_json(&UiResponse::error("msg-1", "tool not found")),
        json!({
            "type": "ui-message-response",
            "messageId": "msg-1",
            "payload": {"error": {"message": "tool not found"}},
        })
    );
}

#[test]
fn error_with_code_and_data_shape() {
    let response = UiResponse::from_error(
        "msg-1",
        mcp_ui_bridge::models::response::ResponseError {
            message: "rate limited".into(),
            code: Some("RATE_LIMIT".into()),
            data: Some(json!({"retryAfter": 30})),
        },
    );
    assert_eq!(
        to_json(&response)["payload"]["error"],
        json!({"message": "rate limited", "code": "RATE_LIMIT", "data": {"retryAfter": 30}})
    );
}

#[test]
fn no_op_result_is_success_with_empty_payload() {
    let response = ActionResult::default().into_response("msg-9");
    assert_eq!(response.body, ResponseBody::Success(None));
    assert!(response.is_success());
    assert_eq!(
        to_json(&response),
        json!({"type": "ui-message-response", "messageId": "msg-9", "payload": {}})
    );
}

#[test]
fn null_success_value_sends_empty_payload() {
    let response = UiResponse::success("m", Value::Null);
    assert_eq!(response.body, ResponseBody::Success(None));

    let wire = to_json(&response);
    assert_eq!(
        wire,
        json!({"type": "ui-message-response", "messageId": "m", "payload": {}})
    );
    let parsed: UiResponse = serde_json::from_value(wire).expect("deserialize");
    assert_eq!(parsed, response);
}

#[test]
fn null_inside_success_body_is_not_serialized() {
    let response = UiResponse {
        message_id: "m".into(),
        body: ResponseBody::Success(Some(Value::Null)),
    };
    assert_eq!(to_json(&response)["payload"], json!({}));
}

#[test]
fn null_handler_value_is_a_no_op_result() {
    assert_eq!(ActionResult::success(Value::Null), ActionResult::default());
    assert_eq!(
        ActionResult::success(Value::Null).into_response("m").body,
        ResponseBody::Success(None)
    );
}

#[test]
fn response_envelopes_parse() {
    let raw = json!({"type": "ui-message-received", "messageId": "m"});
    let received: UiResponse = serde_json::from_value(raw).expect("received");
    assert_eq!(received.body, ResponseBody::Received);

    let error: UiResponse = serde_json::from_value(json!({
        "type": "ui-message-response",
        "messageId": "m",
        "payload": {"error": {"message": "tool not found"}},
    }))
    .expect("error");
    assert!(error.is_error());

    let raw = json!({"type": "ui-message-response", "messageId": "m"});
    let bare: UiResponse = serde_json::from_value(raw).expect("bare");
    assert_eq!(bare.body, ResponseBody::Success(None));
}

#[test]
fn error_wins_when_both_fields_present() {
    let response: UiResponse = serde_json::from_value(json!({
        "type": "ui-message-response",
        "messageId": "m",
        "payload": {"response": 1, "error": {"message": "late failure"}},
    }))
    .expect("deserialize");
    assert!(response.is_error());
}

#[test]
fn received_with_payload_is_rejected() {
    let result: Result<UiResponse, _> = serde_json::from_value(json!({
        "type": "ui-message-received",
        "messageId": "m",
        "payload": {"response": 1},
    }));
    assert!(result.is_err());
}

#[test]
fn unknown_response_type_is_rejected() {
    let result: Result<UiResponse, _> =
        serde_json::from_value(json!({"type": "ui-message-other", "messageId": "m"}));
    assert!(result.is_err());
}
