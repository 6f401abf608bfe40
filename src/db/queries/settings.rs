use rusqlite::{params, Connection};
use std::collections::HashMap;

use crate::error::AppResult;
use crate::models::Settings;

pub fn get_all_settings(conn: &Connection) -> rusqlite::Result<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings")?;

    let settings = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<HashMap<_, _>, _>>()?;

    Ok(settings)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value, updated_at)
         VALUES (?, ?, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_settings(conn: &Connection) -> AppResult<Settings> {
    let settings_map = get_all_settings(conn)?;
    Ok(Settings::from_map(settings_map))
}

/// Persist every field of `settings` atomically.
pub fn save_settings(conn: &Connection, settings: &Settings) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    for (key, value) in settings.to_map() {
        set_setting(&tx, &key, &value)?;
    }
    tx.commit()?;
    tracing::info!(
        currency = %settings.currency,
        locale = %settings.locale,
        tax_rate = settings.tax_rate,
        "Saved settings"
    );
    Ok(())
}
