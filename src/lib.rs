//! upseek uploads a file to a web application and then brute-forces the
//! path the server stored it under.
//!
//! The run has two halves: [`http::UploadClient`] posts the file and records
//! the time window around the request, then [`generation::CandidateGenerator`]
//! turns that window into an ordered list of guesses which
//! [`http::ProbeRunner`] requests one by one until one answers 200.

pub mod config;
pub mod core;
pub mod generation;
pub mod http;
pub mod reporting;
pub mod ui;

// Re-export commonly used items
pub use config::{CliConfig, Config};
pub use crate::core::{Candidate, ProbeOutcome, Result, UploadOutcome, UpseekError};
pub use generation::{CandidateGenerator, DigestAlgorithm, digest};
pub use http::{
    HttpSession, ProbeFailurePolicy, ProbeRunner, ReqwestSession, SessionConfig, UploadClient,
};
