use clap::Parser;
use upseek::config::{CliConfig, Config};
use upseek::core::constants::output_formats;
use upseek::core::types::{ProbeOutcome, UploadOutcome};
use upseek::generation::CandidateGenerator;
use upseek::http::{ProbeRunner, ReqwestSession, UploadClient};
use upseek::reporting::logging;
use upseek::ui::output::{self, JsonReport, RunParameters};
use upseek::ui::{Cli, Commands, ProgressReporter, Target, cli_to_config, print_completions};

use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    let target = match cli.target() {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("\nFor more information, try '--help'.");
            std::process::exit(1);
        }
    };

    match run_upseek_logic(&cli, &target).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            print_completions(shell);
            Some(0)
        }
        None => None,
    }
}

/// Upload, generate candidates and probe; returns the process exit code
pub async fn run_upseek_logic(
    cli: &Cli,
    target: &Target<'_>,
) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli)?;
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    if output_settings.should_show_run_info() {
        output::display_run_parameters(&RunParameters {
            url: target.url,
            uploads_path: target.uploads_path,
            file_param: target.file_param,
            file_path: &cli.file_path,
            post_data: cli.post_data.as_deref(),
        });
    }

    let session = ReqwestSession::new(&config.session_config()?)?;
    let mut progress = create_progress_reporter(&output_settings);

    // Upload
    if let Some(ref mut prog) = progress {
        prog.start_upload(&cli.file_path);
    }
    let upload = UploadClient::new(&session)
        .with_accepted_status(config.accepted_status_codes())
        .upload(
            target.url,
            target.file_param,
            cli.post_data.as_deref(),
            Path::new(&cli.file_path),
        )
        .await;

    let upload = match upload {
        Ok(upload) => {
            if let Some(ref prog) = progress {
                prog.finish_upload(Some(upload.status));
            }
            upload
        }
        Err(e) => {
            if let Some(ref prog) = progress {
                prog.finish_upload(None);
            }
            logging::log_error("Upload failed", Some(&e));
            report_failure(&output_settings, None, 0, "Upload failed", &e.reason())?;
            return Ok(1);
        }
    };

    logging::log_upload_info(&upload);
    if upload.server_clock.is_none() {
        logging::log_warning("Upload response carried no Date header; using the local date");
    }
    if output_settings.should_show_run_info() {
        output::display_upload_body(&upload);
    }

    // Candidate generation
    let candidates = CandidateGenerator::new()
        .with_dedup(config.dedup.unwrap_or(false))
        .generate_for(&upload);
    if output_settings.should_show_run_info() {
        output::display_candidate_count(candidates.len());
    }

    // Probing
    let policy = config.probe_failure_policy()?;
    let outcome = ProbeRunner::new(&session)
        .with_policy(policy)
        .probe(target.uploads_path, &candidates, progress.as_mut())
        .await;

    finalize_progress_reporter(progress);

    match outcome {
        Ok(outcome) => {
            display_final_result(&output_settings, &upload, candidates.len(), &outcome)?;
            Ok(0)
        }
        Err(e) => {
            logging::log_error("Probing aborted", Some(&e));
            report_failure(
                &output_settings,
                Some(&upload),
                candidates.len(),
                "Probing aborted",
                &e.to_string(),
            )?;
            Ok(1)
        }
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn is_json(&self) -> bool {
        self.output_format == output_formats::JSON
    }

    pub fn should_show_run_info(&self) -> bool {
        !self.quiet && !self.is_json()
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config
        .output_format
        .as_deref()
        .unwrap_or(output_formats::DEFAULT)
        .to_string();
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    if output_settings.show_progress && !output_settings.is_json() {
        Some(ProgressReporter::new(true))
    } else {
        None
    }
}

/// Finalize progress reporting
pub fn finalize_progress_reporter(progress: Option<ProgressReporter>) {
    if let Some(ref progress) = progress {
        progress.finish_and_clear();
    }
}

fn display_final_result(
    output_settings: &OutputSettings,
    upload: &UploadOutcome,
    candidates: usize,
    outcome: &ProbeOutcome,
) -> Result<(), Box<dyn std::error::Error>> {
    if output_settings.is_json() {
        println!(
            "{}",
            JsonReport::new(Some(upload), candidates, Some(outcome), None).to_json()?
        );
    } else {
        output::display_probe_outcome(outcome, &upload.original_filename);
    }
    Ok(())
}

fn report_failure(
    output_settings: &OutputSettings,
    upload: Option<&UploadOutcome>,
    candidates: usize,
    context: &str,
    message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if output_settings.is_json() {
        let error = format!("{context}: {message}");
        println!(
            "{}",
            JsonReport::new(upload, candidates, None, Some(error)).to_json()?
        );
    } else {
        output::display_error(context, message);
    }
    Ok(())
}
