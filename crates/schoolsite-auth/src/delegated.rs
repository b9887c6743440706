//! Bearer tokens issued by an external identity provider.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use schoolsite_core::config::AuthConfig;
use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;

use crate::authenticator::{AdminPrincipal, Authenticator, Credentials};

/// Claims the identity provider puts in admin tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject, the user identifier at the provider.
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Roles granted by the provider.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Validates HS256 identity tokens and requires the admin role.
#[derive(Clone)]
pub struct DelegatedIdentityAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
    admin_role: String,
}

impl std::fmt::Debug for DelegatedIdentityAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedIdentityAuthenticator")
            .field("validation", &self.validation)
            .field("admin_role", &self.admin_role)
            .finish()
    }
}

impl DelegatedIdentityAuthenticator {
    /// Create the authenticator from auth configuration.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret is not set"));
        }
        if config.issuer.is_empty() || config.audience.is_empty() {
            return Err(AppError::configuration(
                "auth.issuer and auth.audience must be set for delegated mode",
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            admin_role: config.admin_role.clone(),
        })
    }

    fn decode_token(&self, token: &str) -> AppResult<IdentityClaims> {
        decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::authentication("Token issuer is not trusted")
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AppError::authentication("Token audience does not match")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })
    }
}

#[async_trait]
impl Authenticator for DelegatedIdentityAuthenticator {
    fn mode(&self) -> &str {
        "delegated"
    }

    async fn authenticate(&self, credentials: &Credentials) -> AppResult<AdminPrincipal> {
        let Credentials::Bearer(token) = credentials else {
            return Err(AppError::authentication("A bearer token is required"));
        };

        let claims = self.decode_token(token)?;
        if !claims.roles.iter().any(|r| r == &self.admin_role) {
            debug!(subject = %claims.sub, "Token lacks the admin role");
            return Err(AppError::authentication(format!(
                "Role '{}' is required",
                self.admin_role
            )));
        }

        Ok(AdminPrincipal {
            subject: claims.sub,
            roles: claims.roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use schoolsite_core::error::ErrorKind;

    const SECRET: &str = "test-secret-that-is-long-enough";

    fn config() -> AuthConfig {
        AuthConfig {
            issuer: "https://id.colegio.test".to_string(),
            audience: "schoolsite".to_string(),
            jwt_secret: SECRET.to_string(),
            ..AuthConfig::default()
        }
    }

    fn token(iss: &str, roles: &[&str], exp_offset: i64, secret: &str) -> String {
        let claims = IdentityClaims {
            sub: "staff-7".to_string(),
            iss: iss.to_string(),
            aud: "schoolsite".to_string(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_admin_token() {
        let auth = DelegatedIdentityAuthenticator::new(&config()).unwrap();
        let principal = auth
            .authenticate(&Credentials::Bearer(token(
                "https://id.colegio.test",
                &["site_admin"],
                600,
                SECRET,
            )))
            .await
            .unwrap();
        assert_eq!(principal.subject, "staff-7");
    }

    #[tokio::test]
    async fn test_rejections() {
        let auth = DelegatedIdentityAuthenticator::new(&config()).unwrap();
        let cases = [
            token("https://id.colegio.test", &["guardian"], 600, SECRET),
            token("https://evil.test", &["site_admin"], 600, SECRET),
            token("https://id.colegio.test", &["site_admin"], -600, SECRET),
            token(
                "https://id.colegio.test",
                &["site_admin"],
                600,
                "another-secret-entirely",
            ),
        ];
        for t in cases {
            let err = auth
                .authenticate(&Credentials::Bearer(t))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }

        let err = auth
            .authenticate(&Credentials::Basic {
                username: "admin".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_requires_secret() {
        let err = DelegatedIdentityAuthenticator::new(&AuthConfig::default()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
