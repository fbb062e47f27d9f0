/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Output format constants
pub mod output_formats {
    /// Text output format - human readable run log
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status that counts as a located file
    pub const OK: u16 = 200;
    /// HTTP 201 Created
    pub const CREATED: u16 = 201;
    /// HTTP 202 Accepted
    pub const ACCEPTED: u16 = 202;
    /// HTTP 204 No Content
    pub const NO_CONTENT: u16 = 204;
    /// HTTP 404 Not Found
    pub const NOT_FOUND: u16 = 404;

    /// Upload responses accepted as "file stored"
    pub const UPLOAD_ACCEPTED: [u16; 4] = [OK, CREATED, ACCEPTED, NO_CONTENT];
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Largest timeout accepted by config validation (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Redirect hops followed by probes before giving up
    pub const MAX_REDIRECTS: usize = 10;
}

/// HTTP session defaults
pub mod session {
    /// Browser-like user agent; upload forms often reject non-browser clients
    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/48.0.2564.109 Safari/537.36";
    /// Local file uploaded when none is given
    pub const DEFAULT_FILE_PATH: &str = "file.txt";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".upseek.toml";
}

/// Probe failure policy names used in config files and on the CLI
pub mod probe_policies {
    /// Stop probing at the first transport failure
    pub const ABORT: &str = "abort";
    /// Count the failed probe and move to the next candidate
    pub const SKIP: &str = "skip";

    pub const DEFAULT: &str = ABORT;
    pub const ALL: [&str; 2] = [ABORT, SKIP];
}

/// Display and formatting constants
pub mod display {
    /// Emoji for a located file
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for exhausted candidates
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for fatal errors
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for upload information
    pub const UPLOAD_EMOJI: &str = "📤";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_formats_constants() {
        assert_eq!(output_formats::TEXT, "text");
        assert_eq!(output_formats::JSON, "json");
        assert_eq!(output_formats::DEFAULT, "text");
        assert_eq!(output_formats::ALL.len(), 2);
    }

    #[test]
    fn test_upload_accepted_codes() {
        assert_eq!(http_status::UPLOAD_ACCEPTED, [200, 201, 202, 204]);
        assert!(!http_status::UPLOAD_ACCEPTED.contains(&http_status::NOT_FOUND));
    }

    #[test]
    fn test_probe_policy_constants() {
        assert_eq!(probe_policies::DEFAULT, "abort");
        assert!(probe_policies::ALL.contains(&"skip"));
    }

    #[test]
    fn test_timeout_constants() {
        assert_eq!(timeouts::DEFAULT_TIMEOUT_SECONDS, 30);
        assert_eq!(timeouts::MAX_TIMEOUT_SECONDS, 86_400);
    }
}
