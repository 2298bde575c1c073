//! Shared utilities and common types for the Streamdash admin backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Opaque cursor pagination for collection scans
//! - Common validation logic for request payloads

pub mod pagination;
pub mod validation;
