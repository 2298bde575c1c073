//! Database entity definitions.

pub mod document;

pub use document::DocumentEntity;
