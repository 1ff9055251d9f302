use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::env::{substitute, EnvMap};

pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Credentials that turn into exactly one request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Bearer(String),
    /// `user:password`, encoded as given.
    Basic(String),
    ApiKey { header: String, key: String },
}

impl Auth {
    /// Computes the header after substituting template tokens into the
    /// credential. The header name is used verbatim.
    pub fn header(&self, env: &EnvMap) -> (String, String) {
        match self {
            Auth::Bearer(token) => (
                "Authorization".to_string(),
                format!("Bearer {}", substitute(token, env)),
            ),
            Auth::Basic(credentials) => {
                let encoded = STANDARD.encode(substitute(credentials, env));
                ("Authorization".to_string(), format!("Basic {encoded}"))
            }
            Auth::ApiKey { header, key } => (header.clone(), substitute(key, env)),
        }
    }
}
