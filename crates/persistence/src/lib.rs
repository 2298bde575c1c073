//! Persistence layer for the Streamdash admin backend.
//!
//! This crate contains:
//! - Document store abstraction with PostgreSQL and in-memory backends
//! - Connection probing that fixes the process-wide `ConnectionState`
//! - Repository implementations with their fallback policy

pub mod connection;
pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod repositories;
pub mod store;

pub use connection::ConnectionState;
pub use error::StoreError;
