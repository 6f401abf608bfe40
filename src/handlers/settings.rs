use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;

use crate::db::queries::settings;
use crate::error::{AppError, AppResult};
use crate::models::settings::is_valid_tax_rate;
use crate::models::Settings;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SettingsPayload {
    pub currency: Option<String>,
    pub locale: Option<String>,
    pub tax_rate: Option<f64>,
}

impl SettingsPayload {
    /// Apply the provided fields on top of `current`.
    fn merge_into(self, mut current: Settings) -> AppResult<Settings> {
        if let Some(currency) = self.currency {
            let currency = currency.trim().to_uppercase();
            if currency.is_empty() {
                return Err(AppError::Validation("Currency is required".into()));
            }
            current.currency = currency;
        }
        if let Some(locale) = self.locale {
            let locale = locale.trim();
            if locale.is_empty() {
                return Err(AppError::Validation("Locale is required".into()));
            }
            current.locale = locale.to_string();
        }
        if let Some(rate) = self.tax_rate {
            if !is_valid_tax_rate(rate) {
                return Err(AppError::Validation(
                    "Tax rate must be between 0 and 100".into(),
                ));
            }
            current.tax_rate = rate;
        }
        Ok(current)
    }
}

pub async fn show(State(state): State<AppState>) -> AppResult<Json<Settings>> {
    Ok(Json(state.load_settings()?))
}

pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<SettingsPayload>,
) -> AppResult<Json<Settings>> {
    let conn = state.db.get()?;

    let updated = payload.merge_into(settings::get_settings(&conn)?)?;
    settings::save_settings(&conn, &updated)?;

    Ok(Json(updated))
}
