//! Domain layer for the Streamdash admin backend.
//!
//! This crate contains:
//! - Domain models (AppSettings, SettingsPatch, User, payouts, help requests)
//! - The `StoredDocument` contract tying models to their collections
//! - The static fallback data served when no document store is configured

pub mod models;
pub mod services;
