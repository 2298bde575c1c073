//! AppSettings endpoints.

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use validator::Validate;

use domain::models::{AppSettings, SettingsPatch};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_settings_write;

/// Where a settings read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsSource {
    Store,
    Fallback,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// `null` when the stored document is missing or unreadable.
    pub settings: Option<AppSettings>,
    pub source: SettingsSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSettingsResponse {
    pub updated: bool,
    pub groups: Vec<&'static str>,
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_settings).patch(patch_settings).put(put_settings),
    )
}

fn source(state: &AppState) -> SettingsSource {
    if state.settings.is_configured() {
        SettingsSource::Store
    } else {
        SettingsSource::Fallback
    }
}

/// Read the settings document.
///
/// GET /api/v1/settings
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        settings: state.settings.fetch_settings().await,
        source: source(&state),
    })
}

/// Replace the named groups of the settings document.
///
/// PATCH /api/v1/settings
pub async fn patch_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<PatchSettingsResponse>, ApiError> {
    patch.validate()?;
    if patch.is_empty() {
        return Err(ApiError::Validation(
            "Patch must name at least one settings group".to_string(),
        ));
    }

    let groups = patch.group_names();
    let updated = state.settings.apply_partial_update(patch).await;
    record_settings_write("patch", updated);

    if !updated {
        return Err(ApiError::ServiceUnavailable(
            "Settings could not be updated".to_string(),
        ));
    }

    Ok(Json(PatchSettingsResponse { updated, groups }))
}

/// Overwrite the whole settings document.
///
/// PUT /api/v1/settings
pub async fn put_settings(
    State(state): State<AppState>,
    Json(document): Json<AppSettings>,
) -> Result<Json<SettingsResponse>, ApiError> {
    SettingsPatch::from(document.clone()).validate()?;

    let result = state.settings.create_settings(document).await;
    record_settings_write("overwrite", result.is_ok());

    Ok(Json(SettingsResponse {
        settings: Some(result?),
        source: source(&state),
    }))
}
