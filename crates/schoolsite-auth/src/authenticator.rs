//! The admin authentication capability.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;

/// Credentials presented by a caller of the admin surface.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Username and password (HTTP Basic).
    Basic {
        /// Username.
        username: String,
        /// Plaintext password.
        password: String,
    },
    /// A token issued by an identity provider (HTTP Bearer).
    Bearer(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"****")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"****").finish(),
        }
    }
}

impl Credentials {
    /// Parse an HTTP `Authorization` header value.
    pub fn from_authorization_header(value: &str) -> AppResult<Self> {
        let (scheme, rest) = value
            .trim()
            .split_once(' ')
            .ok_or_else(|| AppError::authentication("Malformed Authorization header"))?;
        let rest = rest.trim();

        if scheme.eq_ignore_ascii_case("bearer") {
            if rest.is_empty() {
                return Err(AppError::authentication("Empty bearer token"));
            }
            return Ok(Self::Bearer(rest.to_string()));
        }

        if scheme.eq_ignore_ascii_case("basic") {
            let decoded = STANDARD
                .decode(rest)
                .map_err(|_| AppError::authentication("Malformed basic credentials"))?;
            let decoded = String::from_utf8(decoded)
                .map_err(|_| AppError::authentication("Malformed basic credentials"))?;
            let (username, password) = decoded
                .split_once(':')
                .ok_or_else(|| AppError::authentication("Malformed basic credentials"))?;
            return Ok(Self::Basic {
                username: username.to_string(),
                password: password.to_string(),
            });
        }

        Err(AppError::authentication(format!(
            "Unsupported authorization scheme: {scheme}"
        )))
    }
}

/// An authenticated administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminPrincipal {
    /// Stable identifier (username or token subject).
    pub subject: String,
    /// Roles granted to the principal.
    pub roles: Vec<String>,
}

/// Verifies admin credentials.
#[async_trait]
pub trait Authenticator: Send + Sync + std::fmt::Debug + 'static {
    /// Name of the variant, for logs and health output.
    fn mode(&self) -> &str;

    /// Accept or reject the credentials. Rejection is an `Authentication`
    /// error.
    async fn authenticate(&self, credentials: &Credentials) -> AppResult<AdminPrincipal>;
}
