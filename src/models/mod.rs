//! Wire-level domain models.

pub mod action;
pub mod content;
pub mod resource;
pub mod response;
