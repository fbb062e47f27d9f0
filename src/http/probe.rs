use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::{http_status, probe_policies};
use crate::core::error::{Result, UpseekError};
use crate::core::types::{Candidate, ProbeOutcome};
use crate::http::session::HttpSession;
use crate::reporting::logging;
use crate::ui::progress::ProgressReporter;

/// Result of a single probe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResponse {
    /// The candidate answered 200
    Found,
    /// Any other status
    Missing(u16),
    /// The request failed before a status was received
    TransportError(String),
}

/// What to do when a probe fails at the transport level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeFailurePolicy {
    /// Stop probing and report the failure
    #[default]
    Abort,
    /// Count the probe as failed and continue with the next candidate
    Skip,
}

impl fmt::Display for ProbeFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => f.write_str(probe_policies::ABORT),
            Self::Skip => f.write_str(probe_policies::SKIP),
        }
    }
}

impl FromStr for ProbeFailurePolicy {
    type Err = UpseekError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            probe_policies::ABORT => Ok(Self::Abort),
            probe_policies::SKIP => Ok(Self::Skip),
            other => Err(UpseekError::Config(format!(
                "Invalid probe error policy '{other}'. Expected one of: {}.",
                probe_policies::ALL.join(", ")
            ))),
        }
    }
}

/// Walks the candidate list one GET at a time until a candidate answers 200.
pub struct ProbeRunner<'a, S: HttpSession + ?Sized> {
    session: &'a S,
    policy: ProbeFailurePolicy,
}

impl<'a, S: HttpSession + ?Sized> ProbeRunner<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self {
            session,
            policy: ProbeFailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ProbeFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Issue one GET and classify the answer
    pub async fn probe_one(&self, url: &str) -> ProbeResponse {
        match self.session.fetch_status(url).await {
            Ok(http_status::OK) => ProbeResponse::Found,
            Ok(status) => ProbeResponse::Missing(status),
            Err(err) => ProbeResponse::TransportError(err.reason()),
        }
    }

    /// Probe `candidates` in order under `base_url`, stopping at the first 200.
    pub async fn probe(
        &self,
        base_url: &str,
        candidates: &[Candidate],
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<ProbeOutcome> {
        if let Some(ref mut prog) = progress {
            prog.start_probing(candidates.len());
        }

        let mut failed_probes = 0;

        for (index, candidate) in candidates.iter().enumerate() {
            let attempt = index + 1;
            let url = candidate.url_under(base_url);
            let response = self.probe_one(&url).await;

            logging::log_probe_result(attempt, &url, &response);
            if let Some(ref prog) = progress {
                prog.update_probe_progress(attempt);
            }

            match response {
                ProbeResponse::Found => {
                    if let Some(ref prog) = progress {
                        prog.finish_probing(true);
                    }
                    return Ok(ProbeOutcome::found(url, attempt, failed_probes));
                }
                ProbeResponse::Missing(_) => {}
                ProbeResponse::TransportError(reason) => match self.policy {
                    ProbeFailurePolicy::Abort => {
                        if let Some(ref prog) = progress {
                            prog.abandon_probing();
                        }
                        return Err(UpseekError::ProbeTransport {
                            attempt,
                            url,
                            reason,
                        });
                    }
                    ProbeFailurePolicy::Skip => {
                        warn!("Skipping {url} after transport failure: {reason}");
                        if let Some(ref prog) = progress {
                            prog.log_warning(&format!("Skipped {url}: {reason}"));
                        }
                        failed_probes += 1;
                    }
                },
            }
        }

        if let Some(ref prog) = progress {
            prog.finish_probing(false);
        }

        Ok(ProbeOutcome::exhausted(candidates.len(), failed_probes))
    }
}
