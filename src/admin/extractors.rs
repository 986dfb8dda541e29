use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

/// The single shared admin secret, taken from configuration.
#[derive(Clone)]
pub struct AdminSecret(Arc<str>);

impl AdminSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    /// Exact match only. An empty secret never grants access.
    pub fn permits(&self, supplied: &str) -> bool {
        !self.0.is_empty() && *self.0 == *supplied
    }
}

impl FromRef<AppState> for AdminSecret {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.config.admin_token.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Proof that the request carried `?token=<admin secret>`. Checked on every
/// request; there is no session.
pub struct AdminAccess;

#[async_trait]
impl<S> FromRequestParts<S> for AdminAccess
where
    S: Send + Sync,
    AdminSecret: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let secret = AdminSecret::from_ref(state);
        // An unparsable query (e.g. `token` given twice) counts as no token.
        let supplied = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.token)
            .unwrap_or_default();

        if secret.permits(&supplied) {
            Ok(AdminAccess)
        } else {
            Err(AppError::Forbidden)
        }
    }
}
