//! Domain models.

pub mod app_settings;
pub mod document;
pub mod help_request;
pub mod payout;
pub mod settings_patch;
pub mod user;

pub use app_settings::{
    AppSettings, ContentModerationSettings, Currency, FlutterwaveSettings, GameSettings,
    GeneralSettings, GooglePlaySettings, MediaReference, PaymentSettings, RazorpaySettings,
    ReportReason, StripeSettings, WithdrawalSettings, CANONICAL_SETTINGS_KEY,
    LEGACY_SETTINGS_KEY, SETTINGS_COLLECTION,
};
pub use document::{StoredDocument, UpdateStatusRequest};
pub use help_request::{HelpRequest, HelpRequestStatus};
pub use payout::{PayoutMethod, PayoutMethodStatus, PayoutRequest, PayoutStatus};
pub use settings_patch::SettingsPatch;
pub use user::{User, UserStatus};
