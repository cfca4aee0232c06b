// src/probe/target.rs
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Fixed path that identifies an Enterprise server.
pub const PROBE_PATH: &str = "/site/sha";

#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("Invalid base URL '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("Base URL '{0}' has no host")]
    MissingHost(String),
}

/// Base URL of a candidate server: scheme, host and optional port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    base: Url,
}

impl ProbeTarget {
    pub fn parse(input: &str) -> Result<Self, TargetError> {
        let input = input.trim();
        let base = Url::parse(input).map_err(|source| TargetError::Parse {
            input: input.to_string(),
            source,
        })?;
        Self::from_url(base)
    }

    pub fn from_url(base: Url) -> Result<Self, TargetError> {
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(TargetError::UnsupportedScheme(other.to_string())),
        }
        if base.host_str().map_or(true, str::is_empty) {
            return Err(TargetError::MissingHost(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// The URL actually requested. Any path, query or fragment on the base
    /// is replaced.
    pub fn probe_url(&self) -> Url {
        let mut url = self.base.clone();
        url.set_path(PROBE_PATH);
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}

impl FromStr for ProbeTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)
    }
}
