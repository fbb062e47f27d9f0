// Command-line interface definitions and parsing for upseek

use crate::config::CliConfig;
use crate::core::constants::{output_formats, probe_policies, session, timeouts};
use crate::core::error::{Result, UpseekError};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Upload a file, then brute-force the location it was stored under",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Target
    /// Upload endpoint URL
    #[arg(short = 'u', long, value_name = "URL", help_heading = "Target")]
    pub url: Option<String>,

    /// Additional form data as a query string (e.g. submit=Upload&dir=img)
    #[arg(short = 'd', long, value_name = "DATA", help_heading = "Target")]
    pub post_data: Option<String>,

    /// Form field name of the file part
    #[arg(short = 'f', long, value_name = "NAME", help_heading = "Target")]
    pub file_param: Option<String>,

    /// Local file to upload
    #[arg(short = 'p', long, value_name = "PATH", default_value = session::DEFAULT_FILE_PATH, help_heading = "Target")]
    pub file_path: String,

    /// Base URL under which uploaded files are served
    #[arg(short = 'x', long, value_name = "URL", help_heading = "Target")]
    pub uploads_path: Option<String>,

    // Session
    /// Cookie string sent with every request
    #[arg(short = 'c', long, value_name = "COOKIES", help_heading = "Session")]
    pub cookies: Option<String>,

    /// Extra header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER", help_heading = "Session")]
    pub headers: Vec<String>,

    /// Custom User-Agent header
    #[arg(short = 'A', long, value_name = "AGENT", help_heading = "Session")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Session")]
    pub timeout: Option<u64>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Session")]
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, help_heading = "Session")]
    pub insecure: bool,

    // Upload & Probing
    /// Upload status codes treated as success (comma-separated, default: 200,201,202,204)
    #[arg(long, value_name = "CODES", help_heading = "Upload & Probing")]
    pub upload_status: Option<String>,

    /// What to do when a probe fails to connect (default: abort)
    #[arg(long, value_name = "POLICY", value_parser = probe_policies::ALL, help_heading = "Upload & Probing")]
    pub on_probe_error: Option<String>,

    /// Drop repeated candidate paths before probing
    #[arg(long, help_heading = "Upload & Probing")]
    pub dedup: bool,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// The three arguments a run cannot do without
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target<'a> {
    pub url: &'a str,
    pub file_param: &'a str,
    pub uploads_path: &'a str,
}

impl Cli {
    /// Check that upload URL, file parameter and uploads path were all given
    pub fn target(&self) -> Result<Target<'_>> {
        let missing: Vec<&str> = [
            ("--url", &self.url),
            ("--file-param", &self.file_param),
            ("--uploads-path", &self.uploads_path),
        ]
        .iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(flag, _)| *flag)
        .collect();

        match (&self.url, &self.file_param, &self.uploads_path) {
            (Some(url), Some(file_param), Some(uploads_path)) if missing.is_empty() => {
                Ok(Target {
                    url,
                    file_param,
                    uploads_path,
                })
            }
            _ => Err(UpseekError::InvalidArgument(format!(
                "Missing required argument(s): {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Parse a comma-separated status code list
fn parse_status_codes(raw: &str) -> Result<Vec<u16>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u16>()
                .ok()
                .filter(|code| (100..=599).contains(code))
                .ok_or_else(|| {
                    UpseekError::InvalidArgument(format!(
                        "Status code '{s}' is not a valid HTTP status code. Expected a number between 100-599."
                    ))
                })
        })
        .collect()
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> Result<CliConfig> {
    let mut cli_config = CliConfig::default();

    // Session
    if let Some(timeout) = cli.timeout {
        if timeout == 0 {
            return Err(UpseekError::InvalidArgument(
                "Timeout cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            ));
        }
        if timeout > timeouts::MAX_TIMEOUT_SECONDS {
            return Err(UpseekError::InvalidArgument(format!(
                "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
            )));
        }
        cli_config.timeout = Some(timeout);
    }

    cli_config.user_agent = cli.user_agent.clone();
    if !cli.headers.is_empty() {
        cli_config.headers = Some(cli.headers.clone());
    }
    cli_config.cookies = cli.cookies.clone();
    cli_config.proxy = cli.proxy.clone();
    cli_config.skip_ssl_verification = cli.insecure;

    // Upload & probing
    if let Some(ref status_str) = cli.upload_status {
        let codes = parse_status_codes(status_str)?;
        if codes.is_empty() {
            return Err(UpseekError::InvalidArgument(
                "--upload-status needs at least one status code.".to_string(),
            ));
        }
        cli_config.upload_status_codes = Some(codes);
    }
    cli_config.on_probe_error = cli.on_probe_error.clone();
    cli_config.dedup = cli.dedup;

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.no_progress = cli.no_progress;
    cli_config.output_format = cli.format.clone();

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    Ok(cli_config)
}
