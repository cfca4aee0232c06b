// src/probe/outcome.rs
use reqwest::StatusCode;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// The server answered 200 OK at the probe path.
    Matched,
    /// The server answered, but with anything other than 200 OK.
    Reachable,
    /// No response: DNS failure, refused connection, TLS failure or timeout.
    Unreachable,
}

impl ProbeOutcome {
    /// Classify a received status. Redirects are not followed, so a 3xx
    /// lands here like any other non-200 answer.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::OK {
            ProbeOutcome::Matched
        } else {
            ProbeOutcome::Reachable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Matched => "matched",
            ProbeOutcome::Reachable => "reachable",
            ProbeOutcome::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
