//! Candidate path generation
//!
//! This module derives the ordered list of storage paths to probe from
//! the uploaded file name, the upload time window and the reference date.

pub mod candidates;
pub mod digest;
pub mod filename;
pub mod templates;

// Re-export commonly used items
pub use candidates::{CandidateGenerator, expected_len};
pub use digest::{DigestAlgorithm, digest, digest_named};
pub use filename::{SplitName, split_extension};
