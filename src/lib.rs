#![forbid(unsafe_code)]

//! Protocol adapter for MCP-UI: interactive UI resources embedded in MCP
//! tool results.
//!
//! - [`models::content`] and [`codec`] describe renderable content and its
//!   shared wire envelope.
//! - [`models::resource`] builds URI-addressed resource contents.
//! - [`models::action`] parses actions posted back by embedded UIs.
//! - [`router`] dispatches actions to handlers by resource, type, or default.
//! - [`models::response`] builds the envelopes sent back to the UI.

pub mod codec;
pub mod config;
pub mod errors;
pub mod models;
pub mod router;
pub mod validation;

pub use config::CatalogConfig;
pub use errors::{AppError, Result};
pub use models::action::{Action, ActionPayload, ActionType};
pub use models::content::UiContent;
pub use models::resource::ResourceContents;
pub use models::response::UiResponse;
pub use router::{ActionHandler, ActionRequest, ActionResult, Router};
