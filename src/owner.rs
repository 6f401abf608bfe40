//! Request-scoped owner identity.
//!
//! Every company and payment belongs to an owner. The owner is taken from the
//! `X-Owner-Id` header when present, otherwise from the configured default.
//! Identity is trusted as given; verifying it is left to whatever sits in
//! front of the service.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// The header carrying the owner identifier.
pub const OWNER_HEADER: &str = "X-Owner-Id";

const MAX_OWNER_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(OWNER_HEADER) else {
            return Ok(Owner(state.config.default_owner.clone()));
        };

        let owner = value
            .to_str()
            .map_err(|_| AppError::Validation(format!("{} must be valid text", OWNER_HEADER)))?
            .trim();

        if owner.is_empty() || owner.len() > MAX_OWNER_LEN {
            return Err(AppError::Validation(format!(
                "{} must be between 1 and {} characters",
                OWNER_HEADER, MAX_OWNER_LEN
            )));
        }

        Ok(Owner(owner.to_string()))
    }
}
