//! `AdminUser` extractor: reads the Authorization header, authenticates it,
//! and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use schoolsite_auth::Credentials;
use schoolsite_core::error::AppError;
use schoolsite_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin available in handlers.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl AdminUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let credentials = Credentials::from_authorization_header(header)?;
        let principal = state.authenticator.authenticate(&credentials).await?;

        tracing::debug!(
            subject = %principal.subject,
            mode = state.authenticator.mode(),
            "Admin authenticated"
        );

        Ok(AdminUser(RequestContext::new(principal.subject)))
    }
}
