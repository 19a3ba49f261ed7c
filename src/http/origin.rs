//! Backend origin parsing and request-target rewriting.
//!
//! # Rewrite Rules
//! ```text
//! origin  http://backend:9000/api?env=prod
//! request /status?verbose=1
//!     → http://backend:9000/api/status?env=prod&verbose=1
//! ```
//! - Base path and request path are joined with exactly one slash
//! - Origin query comes first; `&` only when both sides are non-empty

use std::fmt;
use std::str::FromStr;

use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::Uri;
use thiserror::Error;
use url::Url;

/// Reasons a backend URL cannot serve as an origin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OriginError {
    #[error("{0}")]
    Parse(#[from] url::ParseError),

    #[error("scheme {0:?} is not supported, expected \"http\"")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("URL must not embed credentials")]
    EmbeddedCredentials,

    #[error("URL must not carry a fragment")]
    Fragment,

    #[error("{0:?} is not a valid authority")]
    InvalidAuthority(String),
}

/// The fixed scheme, authority and optional base path every request is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOrigin {
    scheme: Scheme,
    authority: Authority,
    base_path: String,
    base_query: Option<String>,
}

impl BackendOrigin {
    /// Parse and check a backend URL.
    pub fn parse(raw: &str) -> Result<Self, OriginError> {
        let url = Url::parse(raw.trim())?;

        if url.scheme() != "http" {
            return Err(OriginError::UnsupportedScheme(url.scheme().to_string()));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(OriginError::EmbeddedCredentials);
        }
        if url.fragment().is_some() {
            return Err(OriginError::Fragment);
        }

        let host = url.host_str().ok_or(OriginError::MissingHost)?;
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let authority =
            Authority::from_str(&authority).map_err(|_| OriginError::InvalidAuthority(authority))?;

        Ok(Self {
            scheme: Scheme::HTTP,
            authority,
            base_path: url.path().to_string(),
            base_query: url.query().map(str::to_owned),
        })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Point `uri` at this origin, keeping its path and query.
    pub fn rewrite(&self, uri: &Uri) -> Result<Uri, axum::http::Error> {
        let path = join_paths(&self.base_path, uri.path());
        let query = merge_queries(self.base_query.as_deref(), uri.query());

        let path_and_query = match query {
            Some(query) => PathAndQuery::try_from(format!("{}?{}", path, query))?,
            None => PathAndQuery::try_from(path)?,
        };

        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
    }
}

impl FromStr for BackendOrigin {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BackendOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme, self.authority, self.base_path)?;
        if let Some(query) = &self.base_query {
            write!(f, "?{}", query)?;
        }
        Ok(())
    }
}

fn join_paths(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    }
}

fn merge_queries(base: Option<&str>, request: Option<&str>) -> Option<String> {
    let base = base.unwrap_or_default();
    let request = request.unwrap_or_default();
    match (base.is_empty(), request.is_empty()) {
        (true, true) => None,
        (false, true) => Some(base.to_string()),
        (true, false) => Some(request.to_string()),
        (false, false) => Some(format!("{}&{}", base, request)),
    }
}
