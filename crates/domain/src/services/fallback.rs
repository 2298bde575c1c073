//! Static data served while no document store is configured.
//!
//! Every function returns the same value on every call so the dashboard
//! renders a stable demo state.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    AppSettings, ContentModerationSettings, Currency, FlutterwaveSettings, GameSettings,
    GeneralSettings, GooglePlaySettings, HelpRequest, HelpRequestStatus, MediaReference,
    PaymentSettings, PayoutMethod, PayoutMethodStatus, PayoutRequest, PayoutStatus,
    RazorpaySettings, ReportReason, StripeSettings, User, UserStatus, WithdrawalSettings,
};

fn fixed(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn keywords(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Default settings document.
pub fn app_settings() -> AppSettings {
    let seeded = fixed(2024, 1, 1, 0);

    let game = [("tier1", "10"), ("tier2", "50"), ("tier3", "100"), ("tier4", "500")]
        .into_iter()
        .map(|(tier, amount)| (tier.to_string(), amount.to_string()))
        .collect::<BTreeMap<_, _>>();

    let report_reasons = [
        ("reason_spam", "Spam or misleading"),
        ("reason_nudity", "Nudity or sexual content"),
        ("reason_harassment", "Harassment or bullying"),
        ("reason_underage", "User appears to be underage"),
    ]
    .into_iter()
    .map(|(id, title)| ReportReason {
        id: id.to_string(),
        title: title.to_string(),
        created_at: Some(seeded),
        updated_at: Some(seeded),
    })
    .collect();

    let currencies = vec![
        Currency {
            id: "currency_usd".to_string(),
            name: "US Dollar".to_string(),
            symbol: "$".to_string(),
            country_code: "US".to_string(),
            currency_code: "USD".to_string(),
            is_default: true,
        },
        Currency {
            id: "currency_inr".to_string(),
            name: "Indian Rupee".to_string(),
            symbol: "₹".to_string(),
            country_code: "IN".to_string(),
            currency_code: "INR".to_string(),
            is_default: false,
        },
        Currency {
            id: "currency_eur".to_string(),
            name: "Euro".to_string(),
            symbol: "€".to_string(),
            country_code: "DE".to_string(),
            currency_code: "EUR".to_string(),
            is_default: false,
        },
    ];

    let profile_images = (1..=3)
        .map(|n| MediaReference {
            id: format!("avatar_{}", n),
            name: format!("Avatar {}", n),
            url: format!("https://cdn.example.com/profile/avatar_{}.webp", n),
            created_at: Some(seeded),
        })
        .collect();

    AppSettings {
        general: GeneralSettings {
            video_call_rate: "60".to_string(),
            audio_call_rate: "30".to_string(),
            chat_message_rate: "5".to_string(),
            login_bonus: "100".to_string(),
            referral_bonus: "200".to_string(),
            new_user_bonus: "500".to_string(),
            max_call_duration_minutes: 60,
            live_session_limit_minutes: 120,
            is_app_active: true,
            is_fake_call_enabled: false,
            is_demo_mode: true,
            agora_app_id: String::new(),
            agora_app_certificate: String::new(),
            push_server_key: String::new(),
            extra: BTreeMap::new(),
        },
        payment: PaymentSettings {
            stripe: StripeSettings {
                enabled: true,
                publishable_key: "pk_test_demo".to_string(),
                secret_key: String::new(),
            },
            razorpay: RazorpaySettings::default(),
            flutterwave: FlutterwaveSettings::default(),
            google_play: GooglePlaySettings {
                enabled: true,
                package_name: "com.example.streamdash".to_string(),
                service_account_email: String::new(),
            },
        },
        withdrawal: WithdrawalSettings {
            currency: "USD".to_string(),
            coins: "1000".to_string(),
            min_coins_payout_user: "5000".to_string(),
            min_coins_payout_agency: "10000".to_string(),
        },
        game: GameSettings(game),
        report_reasons,
        currencies,
        profile_images,
        audio_files: Vec::new(),
        video_files: Vec::new(),
        content_moderation: ContentModerationSettings {
            provider: "sightengine".to_string(),
            api_user: String::new(),
            api_secret: String::new(),
            video_banned_keywords: keywords(&["nudity", "violence", "weapon"]),
            post_banned_keywords: keywords(&["scam", "spam", "hate"]),
        },
        updated_at: Some(seeded),
    }
}

/// Sample users, newest first.
pub fn users() -> Vec<User> {
    let rows = [
        ("user_1", "Aarav Shah", "aarav@example.com", "male", "IN", 1200, true, UserStatus::Active, 1),
        ("user_2", "Maria Lopez", "maria@example.com", "female", "MX", 300, false, UserStatus::Active, 2),
        ("user_3", "Chen Wei", "chen@example.com", "male", "CN", 0, false, UserStatus::Blocked, 3),
        ("user_4", "Fatima Noor", "fatima@example.com", "female", "AE", 8800, true, UserStatus::Active, 4),
        ("user_5", "Lukas Braun", "lukas@example.com", "male", "DE", 50, false, UserStatus::Deleted, 5),
    ];

    rows.into_iter()
        .map(
            |(id, name, email, gender, country, coins, is_host, status, day)| User {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                gender: Some(gender.to_string()),
                country: Some(country.to_string()),
                coins,
                is_host,
                status,
                created_at: fixed(2024, 3, day, 9),
                updated_at: fixed(2024, 3, day, 9),
            },
        )
        .rev()
        .collect()
}

/// Sample payout requests, newest first.
pub fn payout_requests() -> Vec<PayoutRequest> {
    let rows = [
        ("payout_1", "user_1", "method_bank", 10000, "10.00", PayoutStatus::Paid, 10),
        ("payout_2", "user_4", "method_upi", 25000, "25.00", PayoutStatus::Approved, 12),
        ("payout_3", "user_4", "method_paypal", 5000, "5.00", PayoutStatus::Pending, 14),
    ];

    rows.into_iter()
        .map(|(id, user_id, method, coins, amount, status, day)| PayoutRequest {
            id: id.to_string(),
            user_id: user_id.to_string(),
            payout_method_id: method.to_string(),
            coins,
            amount: amount.to_string(),
            currency: "USD".to_string(),
            status,
            created_at: fixed(2024, 4, day, 12),
            updated_at: fixed(2024, 4, day, 12),
        })
        .rev()
        .collect()
}

/// Sample payout methods, newest first.
pub fn payout_methods() -> Vec<PayoutMethod> {
    let rows: [(&str, &str, &[&str], PayoutMethodStatus, u32); 3] = [
        ("method_bank", "Bank Transfer", &["accountHolder", "accountNumber", "ifsc"], PayoutMethodStatus::Active, 1),
        ("method_upi", "UPI", &["upiId"], PayoutMethodStatus::Active, 2),
        ("method_paypal", "PayPal", &["email"], PayoutMethodStatus::Inactive, 3),
    ];

    rows.into_iter()
        .map(|(id, name, fields, status, day)| PayoutMethod {
            id: id.to_string(),
            name: name.to_string(),
            required_fields: fields.iter().map(|f| f.to_string()).collect(),
            logo_url: None,
            status,
            created_at: fixed(2024, 2, day, 8),
            updated_at: fixed(2024, 2, day, 8),
        })
        .rev()
        .collect()
}

/// Sample help-desk tickets, newest first.
pub fn help_requests() -> Vec<HelpRequest> {
    let rows = [
        ("help_1", "user_2", "Coins not credited", "I bought 500 coins but my balance did not change.", HelpRequestStatus::Resolved, 1),
        ("help_2", "user_1", "Payout delayed", "My payout has been pending for a week.", HelpRequestStatus::InProgress, 3),
        ("help_3", "user_3", "Account blocked", "Why was my account blocked?", HelpRequestStatus::Open, 5),
    ];

    rows.into_iter()
        .map(|(id, user_id, subject, message, status, day)| HelpRequest {
            id: id.to_string(),
            user_id: user_id.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            contact: None,
            status,
            created_at: fixed(2024, 5, day, 15),
            updated_at: fixed(2024, 5, day, 15),
        })
        .rev()
        .collect()
}
