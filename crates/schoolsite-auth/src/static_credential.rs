//! Single configured username and password. Development only.

use async_trait::async_trait;
use tracing::{debug, warn};

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;

use crate::authenticator::{AdminPrincipal, Authenticator, Credentials};
use crate::password::PasswordHasher;

/// Role granted to the static administrator.
const STATIC_ROLE: &str = "site_admin";

/// Checks HTTP Basic credentials against one argon2 hash from configuration.
#[derive(Debug, Clone)]
pub struct StaticCredentialAuthenticator {
    username: String,
    password_hash: String,
    hasher: PasswordHasher,
}

impl StaticCredentialAuthenticator {
    /// Create the authenticator. The hash must be a PHC string.
    pub fn new(username: &str, password_hash: &str) -> AppResult<Self> {
        if username.is_empty() {
            return Err(AppError::configuration("auth.static_username is not set"));
        }
        if password_hash.is_empty() {
            return Err(AppError::configuration(
                "auth.static_password_hash is not set",
            ));
        }

        warn!(
            username,
            "Static credential authentication is enabled; use it for development only"
        );

        Ok(Self {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            hasher: PasswordHasher::new(),
        })
    }
}

#[async_trait]
impl Authenticator for StaticCredentialAuthenticator {
    fn mode(&self) -> &str {
        "static"
    }

    async fn authenticate(&self, credentials: &Credentials) -> AppResult<AdminPrincipal> {
        let Credentials::Basic { username, password } = credentials else {
            return Err(AppError::authentication(
                "Basic credentials are required",
            ));
        };

        let password_ok = self.hasher.verify_password(password, &self.password_hash)?;
        if username != &self.username || !password_ok {
            debug!(username = %username, "Rejected static credentials");
            return Err(AppError::authentication("Invalid username or password"));
        }

        Ok(AdminPrincipal {
            subject: username.clone(),
            roles: vec![STATIC_ROLE.to_string()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolsite_core::error::ErrorKind;

    fn authenticator() -> StaticCredentialAuthenticator {
        let hash = PasswordHasher::new().hash_password("colegio").unwrap();
        StaticCredentialAuthenticator::new("admin", &hash).unwrap()
    }

    #[tokio::test]
    async fn test_accepts_matching_credentials() {
        let principal = authenticator()
            .authenticate(&Credentials::Basic {
                username: "admin".to_string(),
                password: "colegio".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(principal.subject, "admin");
    }

    #[tokio::test]
    async fn test_rejects_wrong_password_user_and_type() {
        let auth = authenticator();
        for creds in [
            Credentials::Basic {
                username: "admin".to_string(),
                password: "nope".to_string(),
            },
            Credentials::Basic {
                username: "root".to_string(),
                password: "colegio".to_string(),
            },
            Credentials::Bearer("token".to_string()),
        ] {
            let err = auth.authenticate(&creds).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }
    }

    #[test]
    fn test_missing_hash_is_configuration_error() {
        let err = StaticCredentialAuthenticator::new("admin", "").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
