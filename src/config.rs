use std::env;
use std::path::PathBuf;

/// Owner used when a request carries no `X-Owner-Id` header.
pub const DEFAULT_OWNER: &str = "local";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub migrations_path: PathBuf,
    pub default_owner: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("YIELDBOOK_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("YIELDBOOK_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7070),
            database_path: env::var("YIELDBOOK_DATABASE_URL")
                .map(|v| {
                    PathBuf::from(
                        v.strip_prefix("sqlite://")
                            .or_else(|| v.strip_prefix("sqlite:"))
                            .unwrap_or(&v),
                    )
                })
                .unwrap_or_else(|_| PathBuf::from("data/yieldbook.db")),
            migrations_path: env::var("YIELDBOOK_MIGRATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("migrations")),
            default_owner: env::var("YIELDBOOK_DEFAULT_OWNER")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_OWNER.into()),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
