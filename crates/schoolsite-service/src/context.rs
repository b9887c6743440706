//! Context of the administrator performing an operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who is acting, carried into service methods for audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Authenticated subject (username, token subject, or `cli`).
    pub actor: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            request_time: Utc::now(),
        }
    }

    /// Context for operations started from the command line.
    pub fn cli() -> Self {
        Self::new("cli")
    }
}
