use chrono::{DateTime, Local, NaiveDate, Utc};
use log::debug;
use rustc_hash::FxHashSet;

use crate::core::types::{Candidate, UploadOutcome};
use crate::generation::digest::{DigestAlgorithm, digest};
use crate::generation::filename::{SplitName, split_extension};
use crate::generation::templates::{
    DATED_NAME_TEMPLATES, DateParts, FOLDER_TEMPLATES, render_dated_name, render_folder,
};

/// Builds the ordered list of paths an uploaded file may have been stored at.
///
/// The order is fully determined by the file name, the two bracketing
/// timestamps and the reference date. Repeated entries are kept unless
/// deduplication is switched on, so attempt counts stay comparable between
/// runs.
#[derive(Debug, Default, Clone)]
pub struct CandidateGenerator {
    dedup: bool,
}

impl CandidateGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop repeated candidates, keeping the first occurrence
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    /// Candidates for a finished upload
    pub fn generate_for(&self, upload: &UploadOutcome) -> Vec<Candidate> {
        self.generate(
            &upload.original_filename,
            upload.lower_bound,
            upload.upper_bound,
            upload.server_clock,
        )
    }

    /// Generate candidates for `filename` uploaded between `lower` and `upper`.
    ///
    /// Date folders use `server_clock` when given, the host's local date otherwise.
    pub fn generate(
        &self,
        filename: &str,
        lower: DateTime<Utc>,
        upper: DateTime<Utc>,
        server_clock: Option<DateTime<Utc>>,
    ) -> Vec<Candidate> {
        let reference = match server_clock {
            Some(clock) => clock.date_naive(),
            None => Local::now().date_naive(),
        };
        self.generate_on(filename, lower, upper, reference)
    }

    /// Generate candidates with an explicit reference date
    pub fn generate_on(
        &self,
        filename: &str,
        lower: DateTime<Utc>,
        upper: DateTime<Utc>,
        reference: NaiveDate,
    ) -> Vec<Candidate> {
        let split = split_extension(filename);
        let names = candidate_names(&split, lower.timestamp(), upper.timestamp() + 1);

        let plain = DateParts::plain(reference);
        let padded = DateParts::needs_padding(reference).then(|| DateParts::padded(reference));

        let per_name = 1 + FOLDER_TEMPLATES.len() * if padded.is_some() { 3 } else { 1 };
        let mut paths = Vec::with_capacity(names.len() * per_name + DATED_NAME_TEMPLATES.len() * 2);

        for name in &names {
            paths.push(name.clone());

            for folder in FOLDER_TEMPLATES {
                let unpadded = render_folder(folder, &plain);
                paths.push(format!("{unpadded}{name}"));

                // Single-digit month or day: try the padded folder, then the plain one again
                if let Some(ref padded) = padded {
                    paths.push(format!("{}{name}", render_folder(folder, padded)));
                    paths.push(format!("{unpadded}{name}"));
                }
            }
        }

        for template in DATED_NAME_TEMPLATES {
            paths.push(render_dated_name(template, &plain, split.stem, ""));
            if split.has_extension() {
                paths.push(render_dated_name(template, &plain, split.stem, split.extension));
            }
        }

        debug!(
            "Generated {} candidates for '{}' (reference date {}, window {}..={})",
            paths.len(),
            filename,
            reference,
            lower.timestamp(),
            upper.timestamp() + 1
        );

        let candidates = paths.into_iter().map(Candidate::from);
        if self.dedup {
            let mut seen = FxHashSet::default();
            candidates.filter(|c| seen.insert(c.clone())).collect()
        } else {
            candidates.collect()
        }
    }
}

/// Number of candidates produced without deduplication.
///
/// `needs_padding` is true when the reference month or day is below 10.
pub fn expected_len(has_extension: bool, needs_padding: bool) -> usize {
    let algorithms = DigestAlgorithm::ALL.len();
    let per_timestamp = if has_extension { 7 } else { 3 };
    let names = if has_extension { 2 } else { 1 }
        + 2 * algorithms * per_timestamp
        + algorithms * if has_extension { 2 } else { 1 };
    let per_name = 1 + FOLDER_TEMPLATES.len() * if needs_padding { 3 } else { 1 };
    let dated = DATED_NAME_TEMPLATES.len() * if has_extension { 2 } else { 1 };

    names * per_name + dated
}

/// Bare names before folder expansion.
fn candidate_names(split: &SplitName<'_>, lower: i64, upper: i64) -> Vec<String> {
    let stem = split.stem;
    let ext = split.extension;
    let mut names = Vec::new();

    if split.has_extension() {
        names.push(format!("{stem}{ext}"));
    }
    names.push(stem.to_string());

    for t in [lower, upper] {
        let t = t.to_string();
        for algorithm in DigestAlgorithm::ALL {
            names.push(digest(algorithm, &t));
            names.push(digest(algorithm, format!("{t}{stem}")));
            names.push(digest(algorithm, format!("{stem}{t}")));

            if split.has_extension() {
                // The middle two repeat the entries above on purpose
                names.push(format!("{}{ext}", digest(algorithm, &t)));
                names.push(digest(algorithm, format!("{t}{stem}")));
                names.push(digest(algorithm, format!("{stem}{t}")));
                names.push(digest(algorithm, format!("{stem}{t}{ext}")));
            }
        }
    }

    for algorithm in DigestAlgorithm::ALL {
        names.push(digest(algorithm, stem));
        if split.has_extension() {
            names.push(digest(algorithm, format!("{stem}{ext}")));
        }
    }

    names
}
