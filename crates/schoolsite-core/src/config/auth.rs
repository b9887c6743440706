//! Admin authentication configuration.

use serde::{Deserialize, Serialize};

/// Which authenticator guards the admin endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// A single configured username and argon2 password hash. Development only.
    #[default]
    Static,
    /// Bearer tokens issued by an external identity provider.
    Delegated,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Authenticator variant.
    #[serde(default)]
    pub mode: AuthMode,
    /// Username accepted by the static authenticator.
    #[serde(default = "default_static_username")]
    pub static_username: String,
    /// Argon2 PHC string of the static password.
    #[serde(default)]
    pub static_password_hash: String,
    /// Expected `iss` claim of delegated tokens.
    #[serde(default)]
    pub issuer: String,
    /// Expected `aud` claim of delegated tokens.
    #[serde(default)]
    pub audience: String,
    /// HMAC secret shared with the identity provider.
    #[serde(default)]
    pub jwt_secret: String,
    /// Role a delegated token must carry to use the admin endpoints.
    #[serde(default = "default_admin_role")]
    pub admin_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            static_username: default_static_username(),
            static_password_hash: String::new(),
            issuer: String::new(),
            audience: String::new(),
            jwt_secret: String::new(),
            admin_role: default_admin_role(),
        }
    }
}

fn default_static_username() -> String {
    "admin".to_string()
}

fn default_admin_role() -> String {
    "site_admin".to_string()
}
