//! Integration tests for end-to-end dispatch: wire action in, wire
//! response out, including concurrent dispatch and registration.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Map, Value};
use tokio::sync::Notify;

use mcp_ui_bridge::router::adapters::{adapt_tool_handler, RequestContext};
use mcp_ui_bridge::router::{handler_fn, ActionRequest, ActionResult, Router};
use mcp_ui_bridge::{Action, ActionType, AppError, UiResponse};

use super::test_helpers::{bare_action, constant, request};

/// Decode a raw action, dispatch it, and build the outbound envelope the
/// way a host bridge does.
async fn handle_raw(router: &Router, resource_uri: &str, raw: &str) -> Value {
    let action: Action = serde_json::from_str(raw).expect("action json");
    let message_id = action.message_id.clone().unwrap_or_default();
    let request = ActionRequest::new(action, resource_uri);
    let response = match router.dispatch(request).await {
        Ok(result) => result.into_response(message_id),
        Err(err) => UiResponse::error(message_id, &err),
    };
    serde_json::to_value(&response).expect("response json")
}

#[tokio::test]
async fn tool_action_round_trips_to_success_envelope() {
    let router = Router::new();
    router.handle_type(
        ActionType::Tool,
        adapt_tool_handler(
            |_ctx: RequestContext, name: String, params: Map<String, Value>| async move {
                if name == "get_status" && params.get("verbose") == Some(&json!(true)) {
                    Ok(json!({"status": "ok"}))
                } else {
                    Err("tool not found")
                }
            },
        ),
    );

    let raw = json!({
        "type": "tool",
        "messageId": "msg-1",
        "payload": {"toolName": "get_status", "params": {"verbose": true}},
    });
    let ok = handle_raw(&router, "ui://status", &raw.to_string()).await;
    assert_eq!(
        ok,
        json!({
            "type": "ui-message-response",
            "messageId": "msg-1",
            "payload": {"response": {"status": "ok"}},
        })
    );

    let raw = r#"{"type":"tool","messageId":"msg-2","payload":{"toolName":"reboot"}}"#;
    let missing = handle_raw(&router, "ui://status", raw).await;
    assert_eq!(
        missing,
        json!({
            "type": "ui-message-response",
            "messageId": "msg-2",
            "payload": {"error": {"message": "tool not found"}},
        })
    );
}

#[tokio::test]
async fn routing_failure_becomes_error_envelope() {
    let router = Router::new();
    let raw = r#"{"type":"prompt","messageId":"m","payload":{"prompt":"hi"}}"#;
    let response = handle_raw(&router, "ui://x", raw).await;
    let message = response["payload"]["error"]["message"]
        .as_str()
        .expect("error message");
    assert!(message.starts_with("no handler"), "{message}");
}

#[tokio::test]
async fn handler_transport_error_propagates_from_dispatch() {
    let router = Router::new();
    router.set_default(handler_fn(|_request: ActionRequest| async move {
        Err::<ActionResult, _>(AppError::Handler("upstream unavailable".into()))
    }));

    let err = router
        .dispatch(request("", bare_action("notify")))
        .await
        .expect_err("must fail");
    assert_eq!(err, AppError::Handler("upstream unavailable".into()));
}

#[tokio::test]
async fn concurrent_dispatches_share_one_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let router = Arc::new(Router::new());
    router.handle_type(
        ActionType::Prompt,
        handler_fn(move |_request: ActionRequest| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Ok(ActionResult::success(json!("done")))
            }
        }),
    );

    let mut tasks = Vec::new();
    for i in 0..32 {
        let router = Arc::clone(&router);
        tasks.push(tokio::spawn(async move {
            let action = Action::prompt(Some(format!("msg-{i}")), "hi").expect("action");
            router.dispatch(request("", action)).await
        }));
    }

    for task in tasks {
        let result = task.await.expect("join").expect("dispatch");
        assert_eq!(result.response, Some(json!("done")));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 32);
}

#[tokio::test]
async fn slow_handler_does_not_block_registration() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let (entered_tx, release_rx) = (Arc::clone(&entered), Arc::clone(&release));

    let router = Arc::new(Router::new());
    router.set_default(handler_fn(move |_request: ActionRequest| {
        let entered = Arc::clone(&entered_tx);
        let release = Arc::clone(&release_rx);
        async move {
            entered.notify_one();
            release.notified().await;
            Ok(ActionResult::success(json!("slow")))
        }
    }));

    let pending = {
        let router = Arc::clone(&router);
        let slow = request("", bare_action("tool"));
        tokio::spawn(async move { router.dispatch(slow).await })
    };

    entered.notified().await;
    // The slow handler is mid-flight; registration and other dispatches proceed.
    router.handle_type(ActionType::Tool, constant("fast"));
    let fast = tokio::time::timeout(
        Duration::from_secs(5),
        router.dispatch(request("", bare_action("tool"))),
    )
    .await
    .expect("dispatch not blocked")
    .expect("dispatch");
    assert_eq!(fast.response, Some(json!("fast")));

    release.notify_one();
    let slow = pending.await.expect("join").expect("dispatch");
    assert_eq!(slow.response, Some(json!("slow")));
}
