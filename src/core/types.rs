use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Result of a successful upload.
///
/// `lower_bound` is taken right before the request is issued and
/// `upper_bound` right after the response arrives, so the server created
/// the file somewhere in between (assuming client and server clocks agree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadOutcome {
    pub lower_bound: DateTime<Utc>,
    pub upper_bound: DateTime<Utc>,
    /// Clock disclosed by the server's `Date` header, preferred for date-based candidates
    pub server_clock: Option<DateTime<Utc>>,
    /// Base name of the uploaded file
    pub original_filename: String,
    pub status: u16,
    /// Raw response body, shown to the user after the upload
    #[serde(skip)]
    pub body: String,
}

impl UploadOutcome {
    /// Width of the bracketing window in whole seconds
    pub fn window_seconds(&self) -> i64 {
        self.upper_bound.timestamp() - self.lower_bound.timestamp()
    }
}

/// A guessed storage path, relative to the uploads base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL of this candidate under `base_url`.
    ///
    /// The base is joined verbatim with a single `/`; no normalisation happens.
    ///
    /// ```
    /// use upseek::core::types::Candidate;
    ///
    /// let candidate = Candidate::new("2024/3/report.pdf");
    /// assert_eq!(
    ///     candidate.url_under("http://host/uploads"),
    ///     "http://host/uploads/2024/3/report.pdf"
    /// );
    /// ```
    pub fn url_under(&self, base_url: &str) -> String {
        format!("{}/{}", base_url, self.0)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Candidate {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for Candidate {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Terminal result of a probing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub found: bool,
    pub url: Option<String>,
    /// Requests issued; equals the 1-based position of the match when found
    pub attempts_made: usize,
    /// Probes that failed at the transport level and were skipped
    pub failed_probes: usize,
}

impl ProbeOutcome {
    pub fn found(url: String, attempts_made: usize, failed_probes: usize) -> Self {
        Self {
            found: true,
            url: Some(url),
            attempts_made,
            failed_probes,
        }
    }

    pub fn exhausted(attempts_made: usize, failed_probes: usize) -> Self {
        Self {
            found: false,
            url: None,
            attempts_made,
            failed_probes,
        }
    }
}
