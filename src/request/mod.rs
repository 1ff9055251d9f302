mod auth;
mod headers;
mod model;

use std::{fs, io, path::PathBuf};

use thiserror::Error;

use crate::env::{substitute, EnvMap};

pub use auth::{Auth, DEFAULT_API_KEY_HEADER};
pub use headers::parse_headers;
pub use model::{Headers, Method, Request, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("unsupported HTTP method: {0} (expected GET, POST, PUT, DELETE or PATCH)")]
    UnsupportedMethod(String),
    #[error("reading body file {}: {source}", path.display())]
    BodyFile { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    Inline(String),
    File(PathBuf),
}

/// A request as typed by the user, before template substitution.
#[derive(Debug, Clone)]
pub struct RequestInput {
    pub method: Method,
    pub url: String,
    pub headers: Vec<String>,
    pub body: Option<BodySource>,
    pub auth: Option<Auth>,
    pub timeout_secs: u64,
}

impl RequestInput {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            auth: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Applies `env` to the URL, header values, body and credentials.
    /// Header names are never substituted. An auth header replaces any
    /// same-named `-H` header.
    pub fn resolve(&self, env: &EnvMap) -> Result<Request, RequestError> {
        let mut headers = parse_headers(&self.headers);
        for value in headers.values_mut() {
            *value = substitute(value, env);
        }

        if let Some(auth) = &self.auth {
            let (name, value) = auth.header(env);
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            headers.insert(name, value);
        }

        let body = match &self.body {
            Some(BodySource::Inline(text)) => Some(substitute(text, env)),
            Some(BodySource::File(path)) => {
                let text = fs::read_to_string(path).map_err(|source| RequestError::BodyFile {
                    path: path.clone(),
                    source,
                })?;
                Some(substitute(&text, env))
            }
            None => None,
        }
        .filter(|text| !text.is_empty());

        Ok(Request {
            method: self.method,
            url: substitute(&self.url, env),
            headers,
            body,
            timeout_secs: self.timeout_secs,
        })
    }
}
