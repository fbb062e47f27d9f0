//! Structured logging for the upload and probing steps.

pub mod logging;

pub use logging::{init_logger, log_config_info, log_probe_result, log_upload_info};
