//! # schoolsite-auth
//!
//! Authentication for the admin surface. Callers depend on the
//! [`Authenticator`] trait; [`from_config`] picks the variant selected by
//! `auth.mode`.

pub mod authenticator;
pub mod delegated;
pub mod password;
pub mod static_credential;

use std::sync::Arc;

use schoolsite_core::config::{AuthConfig, AuthMode};
use schoolsite_core::result::AppResult;

pub use authenticator::{AdminPrincipal, Authenticator, Credentials};
pub use delegated::DelegatedIdentityAuthenticator;
pub use password::PasswordHasher;
pub use static_credential::StaticCredentialAuthenticator;

/// Build the authenticator selected by configuration.
pub fn from_config(config: &AuthConfig) -> AppResult<Arc<dyn Authenticator>> {
    Ok(match config.mode {
        AuthMode::Static => Arc::new(StaticCredentialAuthenticator::new(
            &config.static_username,
            &config.static_password_hash,
        )?),
        AuthMode::Delegated => Arc::new(DelegatedIdentityAuthenticator::new(config)?),
    })
}
