use crate::config::Config;
use crate::core::types::UploadOutcome;
use crate::http::probe::ProbeResponse;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    // Fails when a logger is already installed, which only happens in tests
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout.unwrap_or(30);
    let skip_ssl_verification = config.skip_ssl_verification.unwrap_or(false);
    let header_count = config.headers.as_ref().map_or(0, Vec::len);
    let has_cookies = config.cookies.is_some();
    let on_probe_error = config.on_probe_error.as_deref().unwrap_or("abort");
    let dedup = config.dedup.unwrap_or(false);

    info!("Configuration: timeout={timeout}s, skip_ssl={skip_ssl_verification}");
    info!("Session: headers={header_count}, cookies={has_cookies}");
    info!(
        "Upload: accepted_status={:?}",
        config.accepted_status_codes()
    );
    info!("Probing: on_probe_error={on_probe_error}, dedup={dedup}");
    if let Some(ref proxy) = config.proxy {
        info!("Proxy: {proxy}");
    }
}

/// Log the recorded upload window
pub fn log_upload_info(outcome: &UploadOutcome) {
    info!(
        "Uploaded '{}' with status {}: window {}..={} ({}s)",
        outcome.original_filename,
        outcome.status,
        outcome.lower_bound.timestamp(),
        outcome.upper_bound.timestamp(),
        outcome.window_seconds()
    );
    match outcome.server_clock {
        Some(clock) => debug!("Reference date from server clock: {}", clock.date_naive()),
        None => debug!("No Date header, reference date falls back to the local clock"),
    }
}

/// Log a single probe result for debugging
pub fn log_probe_result(attempt: usize, url: &str, response: &ProbeResponse) {
    match response {
        ProbeResponse::Found => info!("#{attempt} ✓ {url} -> 200"),
        ProbeResponse::Missing(status) => debug!("#{attempt} ✗ {url} -> {status}"),
        ProbeResponse::TransportError(reason) => warn!("#{attempt} ✗ {url} -> {reason}"),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
