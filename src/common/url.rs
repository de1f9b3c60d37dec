use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{header, request::Parts},
};

use crate::state::AppState;

/// Absolute URL of the current request path, without the query string.
/// Used to build per-item `link` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUrl(pub String);

impl RequestUrl {
    pub fn build(public_url: Option<&str>, scheme: &str, host: &str, path: &str) -> Self {
        let path = path.trim_end_matches('/');
        match public_url {
            Some(base) => Self(format!("{}{}", base.trim_end_matches('/'), path)),
            None => Self(format!("{}://{}{}", scheme, host, path)),
        }
    }

    /// Drops a trailing path segment, e.g. `/movies/new` -> `/movies`.
    pub fn without_suffix(self, suffix: &str) -> Self {
        match self.0.strip_suffix(suffix) {
            Some(base) => Self(base.to_string()),
            None => self,
        }
    }

    pub fn link(&self, id: i32) -> String {
        format!("{}/{}", self.0, id)
    }
}

impl FromRequestParts<AppState> for RequestUrl {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| parts.uri.authority().map(|a| a.as_str()))
            .unwrap_or("localhost")
            .to_string();

        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("http")
            .to_string();

        Ok(Self::build(state.config.public_url.as_deref(), &scheme, &host, &path))
    }
}
