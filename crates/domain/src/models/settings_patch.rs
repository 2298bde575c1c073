//! Partial update of the AppSettings document.
//!
//! A patch works at group granularity: `Some(group)` replaces the entire
//! stored group, `None` leaves it untouched. Fields inside a group are never
//! merged individually, so callers must send the whole group to keep its
//! siblings.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::app_settings::{
    AppSettings, ContentModerationSettings, Currency, GameSettings, GeneralSettings,
    MediaReference, PaymentSettings, ReportReason, WithdrawalSettings,
};

/// Whole-group replacement patch for AppSettings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_withdrawal"))]
    pub withdrawal: Option<WithdrawalSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_reasons: Option<Vec<ReportReason>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_currencies"))]
    pub currencies: Option<Vec<Currency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_images: Option<Vec<MediaReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_files: Option<Vec<MediaReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_files: Option<Vec<MediaReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_moderation: Option<ContentModerationSettings>,
}

impl SettingsPatch {
    /// True when the patch carries no group at all.
    pub fn is_empty(&self) -> bool {
        self.group_names().is_empty()
    }

    /// Stored field names of the groups this patch replaces.
    pub fn group_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.general.is_some() {
            names.push("general");
        }
        if self.payment.is_some() {
            names.push("payment");
        }
        if self.withdrawal.is_some() {
            names.push("withdrawal");
        }
        if self.game.is_some() {
            names.push("game");
        }
        if self.report_reasons.is_some() {
            names.push("reportReasons");
        }
        if self.currencies.is_some() {
            names.push("currencies");
        }
        if self.profile_images.is_some() {
            names.push("profileImages");
        }
        if self.audio_files.is_some() {
            names.push("audioFiles");
        }
        if self.video_files.is_some() {
            names.push("videoFiles");
        }
        if self.content_moderation.is_some() {
            names.push("contentModeration");
        }
        names
    }

    /// Converts the patch into top-level document fields.
    ///
    /// Only present groups appear in the map; each maps to the full group value.
    pub fn into_fields(self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Ok(serde_json::Map::new()),
        }
    }
}

/// A patch naming every group; validating it validates a whole document.
impl From<AppSettings> for SettingsPatch {
    fn from(settings: AppSettings) -> Self {
        Self {
            general: Some(settings.general),
            payment: Some(settings.payment),
            withdrawal: Some(settings.withdrawal),
            game: Some(settings.game),
            report_reasons: Some(settings.report_reasons),
            currencies: Some(settings.currencies),
            profile_images: Some(settings.profile_images),
            audio_files: Some(settings.audio_files),
            video_files: Some(settings.video_files),
            content_moderation: Some(settings.content_moderation),
        }
    }
}

// Blank values are left unchecked; only filled-in values must be well formed.

fn validate_withdrawal(withdrawal: &WithdrawalSettings) -> Result<(), validator::ValidationError> {
    if !withdrawal.currency.is_empty() {
        shared::validation::validate_currency_code(&withdrawal.currency)?;
    }
    for amount in [
        &withdrawal.coins,
        &withdrawal.min_coins_payout_user,
        &withdrawal.min_coins_payout_agency,
    ] {
        if !amount.is_empty() {
            shared::validation::validate_decimal_string(amount)?;
        }
    }
    Ok(())
}

fn validate_currencies(currencies: &[Currency]) -> Result<(), validator::ValidationError> {
    for currency in currencies.iter().filter(|c| !c.currency_code.is_empty()) {
        shared::validation::validate_currency_code(&currency.currency_code)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eur_withdrawal() -> WithdrawalSettings {
        WithdrawalSettings {
            currency: "EUR".to_string(),
            coins: "2000".to_string(),
            min_coins_payout_user: "5000".to_string(),
            min_coins_payout_agency: "10000".to_string(),
        }
    }

    #[test]
    fn test_empty_patch() {
        let patch = SettingsPatch::default();
        assert!(patch.is_empty());
        assert!(patch.into_fields().unwrap().is_empty());
    }

    #[test]
    fn test_into_fields_only_contains_present_groups() {
        let patch = SettingsPatch {
            withdrawal: Some(eur_withdrawal()),
            ..Default::default()
        };
        assert_eq!(patch.group_names(), vec!["withdrawal"]);

        let fields = patch.into_fields().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["withdrawal"]["currency"], "EUR");
        assert_eq!(fields["withdrawal"]["minCoinsPayoutAgency"], "10000");
    }

    #[test]
    fn test_group_is_sent_whole() {
        let patch = SettingsPatch {
            withdrawal: Some(WithdrawalSettings {
                currency: "EUR".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let fields = patch.into_fields().unwrap();

        // Siblings not supplied go out empty: the stored group is replaced, not merged.
        assert_eq!(fields["withdrawal"]["currency"], "EUR");
        assert_eq!(fields["withdrawal"]["minCoinsPayoutUser"], "");
        assert!(fields.get("general").is_none());
    }

    #[test]
    fn test_unknown_group_rejected() {
        let result: Result<SettingsPatch, _> =
            serde_json::from_value(json!({"withdrawl": {"currency": "EUR"}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_camel_case_groups() {
        let patch: SettingsPatch = serde_json::from_value(json!({
            "contentModeration": {"postBannedKeywords": ["spam"]},
            "reportReasons": []
        }))
        .unwrap();
        assert_eq!(patch.group_names(), vec!["reportReasons", "contentModeration"]);
    }

    #[test]
    fn test_validate_accepts_well_formed_withdrawal() {
        let patch = SettingsPatch {
            withdrawal: Some(eur_withdrawal()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_currency_code() {
        let mut withdrawal = eur_withdrawal();
        withdrawal.currency = "euro".to_string();
        let patch = SettingsPatch {
            withdrawal: Some(withdrawal),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("withdrawal"));
    }

    #[test]
    fn test_validate_skips_blank_values() {
        let patch = SettingsPatch::from(AppSettings::default());
        assert!(patch.validate().is_ok());

        let patch = SettingsPatch {
            withdrawal: Some(WithdrawalSettings {
                currency: String::new(),
                coins: "lots".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("withdrawal"));
    }

    #[test]
    fn test_validate_rejects_bad_currency_entry() {
        let patch = SettingsPatch {
            currencies: Some(vec![Currency {
                id: "c1".to_string(),
                name: "Rupee".to_string(),
                symbol: "₹".to_string(),
                country_code: "IN".to_string(),
                currency_code: "rupee".to_string(),
                is_default: true,
            }]),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("currencies"));
    }

    #[test]
    fn test_full_document_patch_names_every_group() {
        let patch = SettingsPatch::from(crate::services::fallback::app_settings());
        assert_eq!(patch.group_names().len(), 10);
        assert!(patch.validate().is_ok());

        let (settings, rejected) = AppSettings::from_stored_fields(patch.into_fields().unwrap());
        assert!(rejected.is_empty());
        let mut expected = crate::services::fallback::app_settings();
        expected.updated_at = None;
        assert_eq!(settings, expected);
    }
}
