//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{http_status, output_formats, probe_policies, session, timeouts};
use crate::core::error::{Result, UpseekError};
use crate::http::probe::ProbeFailurePolicy;
use crate::http::session::{SessionConfig, parse_header};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Timeout in seconds for every HTTP request
    pub timeout: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Extra request headers, each as "Name: value"
    pub headers: Option<Vec<String>>,

    /// Raw cookie string sent with every request
    pub cookies: Option<String>,

    /// Upload response codes that mean the file was stored
    pub upload_status_codes: Option<Vec<u16>>,

    /// Probe transport failure policy (abort, skip)
    pub on_probe_error: Option<String>,

    /// Remove repeated candidates before probing
    pub dedup: Option<bool>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// Output format (text, json)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            user_agent: None, // Falls back to a browser user agent
            headers: None,
            cookies: None,
            upload_status_codes: None, // 200, 201, 202, 204
            on_probe_error: Some(probe_policies::DEFAULT.to_string()),
            dedup: Some(false),
            proxy: None,
            skip_ssl_verification: Some(false),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UpseekError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            UpseekError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(session::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), session::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Session
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref headers) = cli_config.headers {
            self.headers = Some(headers.clone());
        }
        if let Some(ref cookies) = cli_config.cookies {
            self.cookies = Some(cookies.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }

        // Upload & probing
        if let Some(ref codes) = cli_config.upload_status_codes {
            self.upload_status_codes = Some(codes.clone());
        }
        if let Some(ref policy) = cli_config.on_probe_error {
            self.on_probe_error = Some(policy.clone());
        }
        if cli_config.dedup {
            self.dedup = Some(true);
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Upload status codes, defaulting to 200, 201, 202 and 204
    pub fn accepted_status_codes(&self) -> Vec<u16> {
        self.upload_status_codes
            .clone()
            .unwrap_or_else(|| http_status::UPLOAD_ACCEPTED.to_vec())
    }

    pub fn probe_failure_policy(&self) -> Result<ProbeFailurePolicy> {
        self.on_probe_error
            .as_deref()
            .unwrap_or(probe_policies::DEFAULT)
            .parse()
    }

    /// Settings for the HTTP session shared by the upload and the probes
    pub fn session_config(&self) -> Result<SessionConfig> {
        let headers = self
            .headers
            .iter()
            .flatten()
            .map(|raw| parse_header(raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(SessionConfig {
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| session::DEFAULT_USER_AGENT.to_string()),
            headers,
            cookies: self.cookies.clone(),
            timeout: self.timeout_duration(),
            proxy: self.proxy.clone(),
            insecure: self.skip_ssl_verification.unwrap_or(false),
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(UpseekError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(UpseekError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(ref codes) = self.upload_status_codes {
            if codes.is_empty() {
                return Err(UpseekError::Config(
                    "Upload status codes cannot be empty.".to_string(),
                ));
            }
            for &code in codes {
                if !(100..=599).contains(&code) {
                    return Err(UpseekError::Config(format!(
                        "Status code {code} is not a valid HTTP status code. Expected a number between 100-599."
                    )));
                }
            }
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(UpseekError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        self.probe_failure_policy()?;

        for raw in self.headers.iter().flatten() {
            parse_header(raw).map_err(|e| UpseekError::Config(e.to_string()))?;
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Session
    pub timeout: Option<u64>,          // --timeout
    pub user_agent: Option<String>,    // --user-agent
    pub headers: Option<Vec<String>>,  // --header
    pub cookies: Option<String>,       // --cookies
    pub proxy: Option<String>,         // --proxy
    pub skip_ssl_verification: bool,   // --insecure

    // Upload & probing
    pub upload_status_codes: Option<Vec<u16>>, // --upload-status
    pub on_probe_error: Option<String>,        // --on-probe-error
    pub dedup: bool,                           // --dedup

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
