//! HTTP route handlers.

pub mod collections;
pub mod health;
pub mod settings;
