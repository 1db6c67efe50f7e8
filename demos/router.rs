//! `router` demo: wires a [`Router`] with typed adapters and replays a set
//! of sample UI actions, printing the envelopes a host would send back.
//!
//! ```text
//! cargo run --example router -- --catalog demos/catalog.toml
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde_json::{json, Map, Value};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use mcp_ui_bridge::models::content::{HtmlContent, UiContent};
use mcp_ui_bridge::router::adapters::{
    adapt_link_handler, adapt_notify_handler, adapt_tool_handler, adapt_ui_size_handler,
    RequestContext,
};
use mcp_ui_bridge::router::handler_fn;
use mcp_ui_bridge::{
    Action, ActionPayload, ActionRequest, ActionResult, ActionType, AppError, CatalogConfig,
    ResourceContents, Result, Router, UiResponse,
};

const DASHBOARD_URI: &str = "ui://dashboard/main";

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "router", about = "MCP-UI action router demo", long_about = None)]
struct Cli {
    /// Optional TOML catalog of UI resources to list before dispatching.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    if let Some(path) = args.catalog {
        list_catalog(&CatalogConfig::load_from_path(&path)?)?;
    }

    let dashboard = ResourceContents::from_content(
        DASHBOARD_URI,
        &UiContent::Html(HtmlContent {
            html: "<button onclick=\"refresh()\">Refresh</button>".into(),
            annotations: None,
        }),
    )?;
    print_json("resource", &dashboard)?;

    let router = build_router();
    info!(?router, "router ready");

    for (resource_uri, action) in sample_actions()? {
        replay(&router, resource_uri, action).await?;
    }

    Ok(())
}

fn build_router() -> Router {
    let router = Router::new();

    router.handle_type(
        ActionType::Tool,
        adapt_tool_handler(
            |ctx: RequestContext, tool_name: String, params: Map<String, Value>| async move {
                if tool_name == "fail" {
                    return Err(format!("tool {tool_name} is unavailable"));
                }
                Ok(json!({
                    "tool": tool_name,
                    "params": params,
                    "resource": ctx.resource_uri,
                }))
            },
        ),
    );

    router.handle_type(
        ActionType::Notify,
        adapt_notify_handler(
            |_ctx: RequestContext, message: String, level: Option<String>| async move {
                let level = level.as_deref().unwrap_or("info");
                info!(%message, level, "ui notification");
                Ok::<(), AppError>(())
            },
        ),
    );

    router.handle_type(
        ActionType::Link,
        adapt_link_handler(|_ctx: RequestContext, url: String| async move {
            info!(%url, "open link requested");
            Ok::<(), AppError>(())
        }),
    );

    router.handle_type(
        ActionType::UiSizeChange,
        adapt_ui_size_handler(|ctx: RequestContext, height: i64, width: Option<i64>| async move {
            info!(uri = %ctx.resource_uri, height, ?width, "ui resized");
            Ok::<(), AppError>(())
        }),
    );

    router.handle_resource(
        DASHBOARD_URI,
        handler_fn(|request: ActionRequest| async move {
            let Some(action) = request.action else {
                return Ok(ActionResult::default());
            };
            Ok(ActionResult::success(json!({
                "handledBy": "dashboard",
                "type": action.action_type,
            })))
        }),
    );

    router.set_default(handler_fn(|request: ActionRequest| async move {
        let summary = match request.action.as_ref().map(Action::parse_payload) {
            Some(Ok(ActionPayload::Prompt(p))) => format!("prompt: {}", p.prompt),
            Some(Ok(ActionPayload::Intent(i))) => format!("intent: {}", i.intent),
            Some(Ok(other)) => format!("{} action", other.action_type()),
            Some(Err(err)) => return Err(err),
            None => "empty request".to_owned(),
        };
        Ok(ActionResult::success(Value::String(summary)))
    }));

    router
}

fn sample_actions() -> Result<Vec<(&'static str, Action)>> {
    let mut params = Map::new();
    params.insert("city".into(), json!("Seattle"));

    Ok(vec![
        (
            "ui://weather/seattle",
            Action::tool(Some("msg-1".into()), "get_forecast", Some(params))?,
        ),
        (
            "ui://weather/seattle",
            Action::tool(Some("msg-2".into()), "fail", None)?,
        ),
        (
            DASHBOARD_URI,
            Action::prompt(Some("msg-3".into()), "refresh")?,
        ),
        (
            "",
            Action::prompt(Some("msg-4".into()), "What's the weather?")?,
        ),
        (
            "",
            Action::intent(Some("msg-5".into()), "book_table", None)?,
        ),
        ("", Action::notify("Saved", Some("info".into()))?),
        ("", Action::link("https://example.com/docs")?),
        ("", Action::ui_size(480, Some(640))?),
    ])
}

async fn replay(router: &Router, resource_uri: &str, action: Action) -> Result<()> {
    let message_id = action.message_id.clone().unwrap_or_default();
    if !message_id.is_empty() {
        print_json("received", &UiResponse::received(&message_id))?;
    }

    let request = ActionRequest::new(action, resource_uri);
    let response = match router.dispatch(request).await {
        Ok(result) => result.into_response(&message_id),
        Err(err) => {
            warn!(%err, "dispatch failed");
            UiResponse::error(&message_id, &err)
        }
    };
    print_json("response", &response)
}

fn list_catalog(catalog: &CatalogConfig) -> Result<()> {
    let mut cursor: Option<String> = None;
    loop {
        let page = catalog.list_resources(cursor.as_deref())?;
        print_json("resources/list", &page)?;
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => return Ok(()),
        }
    }
}

fn print_json<T: serde::Serialize>(label: &str, value: &T) -> Result<()> {
    let rendered = serde_json::to_string(value).map_err(|err| AppError::Encode(err.to_string()))?;
    println!("{label}: {rendered}");
    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}

