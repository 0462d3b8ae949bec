pub mod logscale;

pub use logscale::LogscaleProvider;

use serde::Serialize;

use crate::search::RankedResult;

/// Outcome of a documentation lookup. Failures are values, not errors, so
/// every variant serializes to a JSON object a caller can show as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    NotFound {
        query: String,
        error: String,
        /// Known keys the query could have named.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        available: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        suggestions: Vec<RankedResult>,
        source: String,
    },
    Failed {
        query: String,
        error: String,
        source: String,
    },
}

impl<T> Lookup<T> {
    pub fn failed(query: &str, error: impl Into<String>, source: &str) -> Self {
        Self::Failed {
            query: query.to_string(),
            error: error.into(),
            source: source.to_string(),
        }
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Found(_) => None,
            Self::NotFound { error, .. } | Self::Failed { error, .. } => Some(error),
        }
    }
}
