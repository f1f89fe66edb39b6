//! Backend data source
//!
//! Everything the UI reads from the server goes through [`Backend::get`].
//! [`FixtureBackend`] answers from a directory of JSON files laid out like
//! the URL space, so the application runs without a server:
//!
//! ```text
//! GET /api/UCSBSubjects/all
//!     -> <root>/api/UCSBSubjects/all.json
//! GET /api/sections/sectionsearch?qtr=20221&enrollCode=06619
//!     -> <root>/api/sections/sectionsearch/qtr-20221_enrollCode-06619.json
//! ```

use log::debug;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("no data for {url} (looked for {})", .path.display())]
    NotFound { url: String, path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A read-only JSON source keyed by URL and query parameters
pub trait Backend {
    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, BackendError>;
}

/// Serves JSON files from a directory tree
#[derive(Debug, Clone)]
pub struct FixtureBackend {
    root: PathBuf,
}

impl FixtureBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File that answers `url` with `params`
    pub fn path_for(&self, url: &str, params: &[(&str, &str)]) -> Result<PathBuf, BackendError> {
        let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty()
            || segments
                .iter()
                .any(|s| *s == "." || *s == ".." || s.contains('\\'))
        {
            return Err(BackendError::InvalidUrl(url.to_string()));
        }

        let mut path = self.root.clone();
        for segment in &segments {
            path.push(segment);
        }

        if params.is_empty() {
            path.set_extension("json");
            return Ok(path);
        }

        let mut parts = Vec::with_capacity(params.len());
        for (key, value) in params {
            if !is_safe_component(key) || !is_safe_component(value) {
                return Err(BackendError::InvalidUrl(format!(
                    "{}?{}={}",
                    url, key, value
                )));
            }
            parts.push(format!("{}-{}", key, value));
        }
        path.push(format!("{}.json", parts.join("_")));
        Ok(path)
    }
}

fn is_safe_component(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && s != "."
        && s != ".."
}

impl Backend for FixtureBackend {
    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, BackendError> {
        let path = self.path_for(url, params)?;
        debug!("GET {} {:?} -> {}", url, params, path.display());

        if !path.exists() {
            return Err(BackendError::NotFound {
                url: url.to_string(),
                path,
            });
        }

        let contents = fs::read_to_string(&path).map_err(|source| BackendError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| BackendError::Parse { path, source })
    }
}

/// In-memory backend for tests, keyed the same way as fixture file names
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryBackend {
    responses: std::collections::BTreeMap<String, Value>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, params: &[(&str, &str)], value: Value) -> Self {
        self.responses.insert(Self::key(url, params), value);
        self
    }

    fn key(url: &str, params: &[(&str, &str)]) -> String {
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}?{}", url, query.join("&"))
    }
}

#[cfg(test)]
impl Backend for MemoryBackend {
    fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, BackendError> {
        self.responses
            .get(&Self::key(url, params))
            .cloned()
            .ok_or_else(|| BackendError::NotFound {
                url: url.to_string(),
                path: PathBuf::from(Self::key(url, params)),
            })
    }
}
