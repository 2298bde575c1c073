//! AppSettings aggregate: the single dashboard-wide configuration document.
//!
//! Every group deserializes with defaults for missing fields. Stored fields
//! are trusted as-is; nothing here enforces cross-field invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Collection holding the settings document.
pub const SETTINGS_COLLECTION: &str = "settings";

/// Canonical key of the settings document.
pub const CANONICAL_SETTINGS_KEY: &str = "dashboard";

/// Key written by older seed tooling. Only read when explicitly configured.
pub const LEGACY_SETTINGS_KEY: &str = "app";

/// Process-wide configuration aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub general: GeneralSettings,
    pub payment: PaymentSettings,
    pub withdrawal: WithdrawalSettings,
    pub game: GameSettings,
    pub report_reasons: Vec<ReportReason>,
    pub currencies: Vec<Currency>,
    pub profile_images: Vec<MediaReference>,
    pub audio_files: Vec<MediaReference>,
    pub video_files: Vec<MediaReference>,
    pub content_moderation: ContentModerationSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppSettings {
    /// Returns the first currency flagged as default, if any.
    pub fn default_currency(&self) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.is_default)
    }

    /// Number of currencies flagged as default.
    ///
    /// "At most one" is expected but not enforced, so this may be 0 or >1.
    pub fn default_currency_count(&self) -> usize {
        self.currencies.iter().filter(|c| c.is_default).count()
    }

    /// Returns a copy with `updated_at` set to `at`.
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Decodes stored top-level fields one group at a time.
    ///
    /// A group whose stored value does not fit its shape keeps its default,
    /// and its field name is returned so the caller can report it. Unknown
    /// top-level fields are ignored.
    pub fn from_stored_fields(
        mut fields: serde_json::Map<String, Value>,
    ) -> (Self, Vec<&'static str>) {
        let mut settings = Self::default();
        let mut rejected = Vec::new();

        macro_rules! group {
            ($field:ident, $name:literal) => {
                if let Some(value) = fields.remove($name) {
                    match serde_json::from_value(value) {
                        Ok(group) => settings.$field = group,
                        Err(_) => rejected.push($name),
                    }
                }
            };
        }

        group!(general, "general");
        group!(payment, "payment");
        group!(withdrawal, "withdrawal");
        group!(game, "game");
        group!(report_reasons, "reportReasons");
        group!(currencies, "currencies");
        group!(profile_images, "profileImages");
        group!(audio_files, "audioFiles");
        group!(video_files, "videoFiles");
        group!(content_moderation, "contentModeration");

        settings.updated_at = fields.remove("updatedAt").as_ref().and_then(parse_timestamp);

        (settings, rejected)
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Minutes stored either as a number or as a numeric string. Anything else reads as 0.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let minutes = match &value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(minutes
        .and_then(|m| u32::try_from(m).ok())
        .unwrap_or_default())
}

/// Optional RFC 3339 timestamp; malformed values read as absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(parse_timestamp(&Value::deserialize(deserializer)?))
}

/// Call pricing, bonuses, limits, feature toggles and third-party credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub video_call_rate: String,
    pub audio_call_rate: String,
    pub chat_message_rate: String,
    pub login_bonus: String,
    pub referral_bonus: String,
    pub new_user_bonus: String,
    #[serde(deserialize_with = "lenient_minutes")]
    pub max_call_duration_minutes: u32,
    #[serde(deserialize_with = "lenient_minutes")]
    pub live_session_limit_minutes: u32,
    pub is_app_active: bool,
    pub is_fake_call_enabled: bool,
    pub is_demo_mode: bool,
    pub agora_app_id: String,
    pub agora_app_certificate: String,
    pub push_server_key: String,
    /// Options added by newer dashboard builds; carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Per-provider payment configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentSettings {
    pub stripe: StripeSettings,
    pub razorpay: RazorpaySettings,
    pub flutterwave: FlutterwaveSettings,
    pub google_play: GooglePlaySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StripeSettings {
    pub enabled: bool,
    pub publishable_key: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RazorpaySettings {
    pub enabled: bool,
    pub key_id: String,
    pub key_secret: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlutterwaveSettings {
    pub enabled: bool,
    pub public_key: String,
    pub secret_key: String,
    pub encryption_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GooglePlaySettings {
    pub enabled: bool,
    pub package_name: String,
    pub service_account_email: String,
}

/// Payout currency and minimum thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WithdrawalSettings {
    pub currency: String,
    /// Coins that convert to one unit of `currency`.
    pub coins: String,
    pub min_coins_payout_user: String,
    pub min_coins_payout_agency: String,
}

/// Bet tiers for in-app games, keyed by tier id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameSettings(pub BTreeMap<String, String>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportReason {
    pub id: String,
    pub title: String,
    #[serde(
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Currency {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub country_code: String,
    pub currency_code: String,
    pub is_default: bool,
}

/// Reference to an uploaded media blob (avatar, audio clip, video).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaReference {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Moderation provider credentials and banned keyword lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentModerationSettings {
    pub provider: String,
    pub api_user: String,
    pub api_secret: String,
    pub video_banned_keywords: BTreeSet<String>,
    pub post_banned_keywords: BTreeSet<String>,
}
