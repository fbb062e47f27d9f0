//! Text and JSON rendering of a run

use serde::Serialize;

use crate::core::constants::display;
use crate::core::error::Result;
use crate::core::types::{ProbeOutcome, UploadOutcome};
use crate::ui::color::{Colors, colorize};

/// What the user asked for, echoed before the upload
#[derive(Debug, Clone)]
pub struct RunParameters<'a> {
    pub url: &'a str,
    pub uploads_path: &'a str,
    pub file_param: &'a str,
    pub file_path: &'a str,
    pub post_data: Option<&'a str>,
}

/// Single JSON document describing the whole run
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub status: &'static str,
    pub upload: Option<&'a UploadOutcome>,
    pub response_body: Option<&'a str>,
    pub candidates: usize,
    pub probe: Option<&'a ProbeOutcome>,
    pub error: Option<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new(
        upload: Option<&'a UploadOutcome>,
        candidates: usize,
        probe: Option<&'a ProbeOutcome>,
        error: Option<String>,
    ) -> Self {
        let status = match (probe, &error) {
            (_, Some(_)) => "error",
            (Some(outcome), None) if outcome.found => "found",
            _ => "not_found",
        };

        Self {
            status,
            upload,
            response_body: upload.map(|u| u.body.as_str()),
            candidates,
            probe,
            error,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn label(text: &str) -> String {
    colorize(text, &format!("{}{}", Colors::BOLD, Colors::CYAN))
}

/// Echo the run parameters
pub fn display_run_parameters(params: &RunParameters<'_>) {
    println!("{}: {}", label("Upload URL"), params.url);
    println!("{}: {}", label("Uploads path"), params.uploads_path);
    println!("{}: {}", label("File POST parameter name"), params.file_param);
    println!("{}: {}", label("Local file to upload"), params.file_path);
    println!(
        "{}: {}",
        label("Additional POST data"),
        params.post_data.unwrap_or("N/A")
    );
}

/// Print the raw upload response body
pub fn display_upload_body(outcome: &UploadOutcome) {
    println!(
        "{} {}",
        display::UPLOAD_EMOJI,
        colorize(
            &format!("Upload accepted with status {}", outcome.status),
            Colors::DIM
        )
    );
    println!("{}", outcome.body);
}

pub fn format_candidate_count(total: usize) -> String {
    format!("Total candidate paths to check: {total}")
}

pub fn display_candidate_count(total: usize) {
    println!("{}", format_candidate_count(total));
}

/// Final found / not-found message
pub fn format_probe_outcome(outcome: &ProbeOutcome, filename: &str) -> String {
    let mut message = match outcome.url {
        Some(ref url) if outcome.found => format!(
            "Found location of uploaded file [{filename}] after {} attempts >> {url}",
            outcome.attempts_made
        ),
        _ => format!(
            "Cannot find uploaded file ({} attempts)",
            outcome.attempts_made
        ),
    };

    if outcome.failed_probes > 0 {
        message.push_str(&format!(
            ", {} probes failed to connect",
            outcome.failed_probes
        ));
    }

    message
}

pub fn display_probe_outcome(outcome: &ProbeOutcome, filename: &str) {
    let message = format_probe_outcome(outcome, filename);
    if outcome.found {
        println!(
            "{} {}",
            display::SUCCESS_EMOJI,
            colorize(&message, Colors::GREEN)
        );
    } else {
        println!(
            "{} {}",
            display::WARNING_EMOJI,
            colorize(&message, Colors::YELLOW)
        );
    }
}

/// Print a fatal error to stderr
pub fn display_error(context: &str, message: &str) {
    eprintln!(
        "{} {}",
        display::ERROR_EMOJI,
        colorize(&format!("{context}: {message}"), Colors::RED)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn upload() -> UploadOutcome {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        UploadOutcome {
            lower_bound: t,
            upper_bound: t,
            server_clock: Some(t),
            original_filename: "report.pdf".to_string(),
            status: 201,
            body: "stored".to_string(),
        }
    }

    #[test]
    fn test_label_is_plain_without_terminal() {
        // FORCE_COLOR may leak in from CI; only assert when it is unset
        if std::env::var_os("FORCE_COLOR").is_none() {
            assert_eq!(label("Upload URL"), "Upload URL");
        }
    }

    #[test]
    fn test_format_candidate_count() {
        assert_eq!(
            format_candidate_count(1114),
            "Total candidate paths to check: 1114"
        );
    }

    #[test]
    fn test_format_probe_outcome_found() {
        let outcome = ProbeOutcome::found("http://h/2024/03/report.pdf".to_string(), 3, 0);
        assert_eq!(
            format_probe_outcome(&outcome, "report.pdf"),
            "Found location of uploaded file [report.pdf] after 3 attempts >> http://h/2024/03/report.pdf"
        );
    }

    #[test]
    fn test_format_probe_outcome_not_found() {
        let outcome = ProbeOutcome::exhausted(183, 0);
        assert_eq!(
            format_probe_outcome(&outcome, "notes"),
            "Cannot find uploaded file (183 attempts)"
        );
    }

    #[test]
    fn test_format_probe_outcome_mentions_failed_probes() {
        let outcome = ProbeOutcome::exhausted(10, 2);
        assert!(format_probe_outcome(&outcome, "a").ends_with("2 probes failed to connect"));
    }

    #[test]
    fn test_json_report_found() -> Result<()> {
        let upload = upload();
        let probe = ProbeOutcome::found("http://h/report.pdf".to_string(), 1, 0);
        let json = JsonReport::new(Some(&upload), 1114, Some(&probe), None).to_json()?;

        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["status"], "found");
        assert_eq!(value["candidates"], 1114);
        assert_eq!(value["response_body"], "stored");
        assert_eq!(value["upload"]["status"], 201);
        assert_eq!(value["upload"]["original_filename"], "report.pdf");
        assert_eq!(value["probe"]["url"], "http://h/report.pdf");
        assert_eq!(value["probe"]["attempts_made"], 1);
        assert!(value["error"].is_null());
        Ok(())
    }

    #[test]
    fn test_json_report_not_found_and_error() -> Result<()> {
        let probe = ProbeOutcome::exhausted(183, 0);
        let report = JsonReport::new(None, 183, Some(&probe), None);
        assert_eq!(report.status, "not_found");

        let report = JsonReport::new(None, 0, None, Some("Unexpected upload status: 403".into()));
        assert_eq!(report.status, "error");
        let value: serde_json::Value = serde_json::from_str(&report.to_json()?)?;
        assert!(value["upload"].is_null());
        assert_eq!(value["error"], "Unexpected upload status: 403");
        Ok(())
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        let upload = upload();
        display_run_parameters(&RunParameters {
            url: "http://h/upload",
            uploads_path: "http://h/files",
            file_param: "file",
            file_path: "file.txt",
            post_data: None,
        });
        display_upload_body(&upload);
        display_candidate_count(3);
        display_probe_outcome(&ProbeOutcome::exhausted(3, 0), "file.txt");
        display_probe_outcome(&ProbeOutcome::found("http://h/x".into(), 1, 0), "x");
        display_error("Upload failed", "connection refused");
    }
}
