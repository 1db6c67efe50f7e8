//! Error types shared across the crate.

use std::fmt::{Display, Formatter};

/// Shared crate result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Crate error enumeration covering decode, routing, and handler failures.
///
/// Business failures reported by a handler do not use this type; they travel
/// inside [`ActionResult::error`](crate::router::ActionResult::error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed wire bytes or payload structure.
    Decode(String),
    /// A value could not be serialized for the wire.
    Encode(String),
    /// A field failed a validation rule (URL scheme, URI prefix, exclusivity).
    Validation(String),
    /// Content envelope carried a MIME type no variant recognises.
    UnknownMimeType(String),
    /// Action carried a type tag outside the closed set.
    UnknownAction(String),
    /// Action tag did not match the tag an accessor or adapter expected.
    TypeMismatch(String),
    /// No resource, type, or default handler matched a dispatch.
    NoHandler(String),
    /// A handler failed to produce a result at all.
    Handler(String),
    /// Catalog configuration parsing or validation failure.
    Config(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(msg) => write!(f, "decode: {msg}"),
            Self::Encode(msg) => write!(f, "encode: {msg}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
            Self::UnknownMimeType(mime) => write!(f, "unknown content mime type: {mime}"),
            Self::UnknownAction(tag) => write!(f, "unknown action type: {tag}"),
            Self::TypeMismatch(msg) => write!(f, "type mismatch: {msg}"),
            Self::NoHandler(msg) => write!(f, "no handler: {msg}"),
            Self::Handler(msg) => write!(f, "handler: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(format!("failed to decode base64 blob: {err}"))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid catalog: {err}"))
    }
}
