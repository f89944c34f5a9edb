use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    entity::settings::{ActiveModel, Column, Entity as Settings},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const WEBSITE_SETTINGS_KEY: &str = "website";

pub async fn load_setting(orm: &OrmConn, key: &str) -> AppResult<Option<Value>> {
    let row = Settings::find_by_id(key.to_string()).one(orm).await?;
    Ok(row.map(|r| r.value))
}

pub async fn store_setting(orm: &OrmConn, key: &str, value: Value) -> AppResult<()> {
    Settings::insert(ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
        updated_at: Set(Utc::now().into()),
    })
    .on_conflict(
        OnConflict::column(Column::Key)
            .update_columns([Column::Value, Column::UpdatedAt])
            .to_owned(),
    )
    .exec_without_returning(orm)
    .await?;
    Ok(())
}

/// Returns the website settings, writing the defaults on first access.
pub async fn get_website_settings(state: &AppState) -> AppResult<ApiResponse<Value>> {
    let settings = match load_setting(&state.orm, WEBSITE_SETTINGS_KEY).await? {
        Some(settings) => settings,
        None => {
            let defaults = default_website_settings(Utc::now());
            store_setting(&state.orm, WEBSITE_SETTINGS_KEY, defaults.clone()).await?;
            tracing::info!("website settings initialised with defaults");
            defaults
        }
    };
    Ok(ApiResponse::success("Website settings", settings, Some(Meta::empty())))
}

pub async fn update_website_settings(
    state: &AppState,
    admin: &AdminUser,
    patch: Value,
) -> AppResult<ApiResponse<Value>> {
    let Value::Object(patch) = patch else {
        return Err(AppError::BadRequest("settings must be a JSON object".into()));
    };

    let now = Utc::now();
    let current = load_setting(&state.orm, WEBSITE_SETTINGS_KEY)
        .await?
        .unwrap_or_else(|| default_website_settings(now));
    let merged = merge_settings(current, patch, now);
    store_setting(&state.orm, WEBSITE_SETTINGS_KEY, merged.clone()).await?;

    tracing::info!(admin = %admin.user_id, version = %merged["version"], "website settings updated");
    Ok(ApiResponse::success("Website settings updated", merged, Some(Meta::empty())))
}

/// Shallow-merges `patch` over `current` and stamps a fresh version.
pub fn merge_settings(current: Value, patch: Map<String, Value>, now: DateTime<Utc>) -> Value {
    let mut merged = match current {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in patch {
        merged.insert(key, value);
    }
    merged.insert("last_updated".into(), json!(now.timestamp_millis()));
    merged.insert("version".into(), json!(settings_version(now)));
    Value::Object(merged)
}

fn settings_version(now: DateTime<Utc>) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{:x}{}", now.timestamp_millis(), &nonce[..8])
}

pub fn default_website_settings(now: DateTime<Utc>) -> Value {
    json!({
        "site_logo": "",
        "site_title": "Storefront",
        "hero_title": "Elegance is an attitude.",
        "hero_subtitle": "New Season Collection",
        "hero_description": "Timeless cuts, premium fabrics and everyday sophistication.",
        "hero_image": "",
        "hero_button_text": "Shop Now",
        "brand_quote": "Simplicity is the keynote of all true elegance.",
        "brand_tagline": "",
        "contact_email_1": "",
        "contact_email_2": "",
        "contact_phone": "",
        "contact_phone_display": "",
        "contact_address": "",
        "contact_city": "",
        "contact_state": "",
        "contact_zip": "",
        "contact_country": "India",
        "monday_friday": "10:00 AM - 8:00 PM IST",
        "saturday": "10:00 AM - 6:00 PM IST",
        "sunday": "Closed",
        "holidays": "Closed",
        "featured_title": "Featured Products",
        "featured_subtitle": "Handpicked items just for you",
        "categories_title": "Curated Categories",
        "categories_subtitle": "Explore our most popular collections",
        "contact_title": "Get in Touch",
        "contact_description": "Have a question or need assistance? Reach out and we'll get back to you as soon as possible.",
        "site_description": "",
        "site_keywords": "",
        "facebook": "",
        "instagram": "",
        "twitter": "",
        "pinterest": "",
        "last_updated": now.timestamp_millis(),
        "version": settings_version(now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_untouched_keys_and_bumps_version() {
        let now = Utc::now();
        let current = default_website_settings(now);
        let old_version = current["version"].clone();

        let mut patch = Map::new();
        patch.insert("site_title".into(), json!("Wisania"));
        let merged = merge_settings(current, patch, now);

        assert_eq!(merged["site_title"], "Wisania");
        assert_eq!(merged["sunday"], "Closed");
        assert_ne!(merged["version"], old_version);
        assert_eq!(merged["last_updated"], json!(now.timestamp_millis()));
    }
}
