//! Domain services.

pub mod fallback;
