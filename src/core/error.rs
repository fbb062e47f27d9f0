use std::fmt;

/// Error kinds surfaced by upseek operations
#[derive(Debug)]
pub enum UpseekError {
    /// IO error (reading the file to upload, config files)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON report serialization error
    Json(serde_json::Error),

    /// Network-level failure reported by the reqwest client
    Http(reqwest::Error),

    /// Network-level failure reported by any other session implementation
    Transport(String),

    /// Upload response status outside the accepted set
    UnexpectedStatus(u16),

    /// The server's `Date` header could not be parsed
    ClockHeader(String),

    /// Digest algorithm name not recognised
    UnsupportedAlgorithm(String),

    /// A probe failed at the transport level and probing was aborted
    ProbeTransport {
        attempt: usize,
        url: String,
        reason: String,
    },

    /// Invalid argument error
    InvalidArgument(String),
}

impl UpseekError {
    /// Whether this error is a network-level failure rather than a protocol answer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            UpseekError::Http(_) | UpseekError::Transport(_) | UpseekError::ProbeTransport { .. }
        )
    }

    /// Human-readable reason, including the underlying cause for reqwest errors
    pub fn reason(&self) -> String {
        match self {
            UpseekError::Http(err) => std::error::Error::source(err)
                .map(|e| format!("{err}: {e}"))
                .unwrap_or_else(|| err.to_string()),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for UpseekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpseekError::Io(err) => write!(f, "IO error: {err}"),
            UpseekError::Config(msg) => write!(f, "Configuration error: {msg}"),
            UpseekError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            UpseekError::Json(err) => write!(f, "JSON error: {err}"),
            UpseekError::Http(err) => write!(f, "HTTP error: {err}"),
            UpseekError::Transport(msg) => write!(f, "Transport error: {msg}"),
            UpseekError::UnexpectedStatus(code) => {
                write!(f, "Unexpected upload status: {code}")
            }
            UpseekError::ClockHeader(value) => write!(f, "Invalid Date header: {value}"),
            UpseekError::UnsupportedAlgorithm(name) => {
                write!(f, "Unsupported digest algorithm: {name}")
            }
            UpseekError::ProbeTransport {
                attempt,
                url,
                reason,
            } => write!(f, "Probe {attempt} failed: {url}: {reason}"),
            UpseekError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for UpseekError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpseekError::Io(err) => Some(err),
            UpseekError::Http(err) => Some(err),
            UpseekError::TomlParsing(err) => Some(err),
            UpseekError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for UpseekError {
    fn from(err: std::io::Error) -> Self {
        UpseekError::Io(err)
    }
}

impl From<reqwest::Error> for UpseekError {
    fn from(err: reqwest::Error) -> Self {
        UpseekError::Http(err)
    }
}

impl From<toml::de::Error> for UpseekError {
    fn from(err: toml::de::Error) -> Self {
        UpseekError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for UpseekError {
    fn from(err: serde_json::Error) -> Self {
        UpseekError::Json(err)
    }
}

/// Type alias for Results using UpseekError
pub type Result<T> = std::result::Result<T, UpseekError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = UpseekError::Config("Invalid timeout".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid timeout"
        );

        let status_error = UpseekError::UnexpectedStatus(403);
        assert_eq!(format!("{status_error}"), "Unexpected upload status: 403");

        let probe_error = UpseekError::ProbeTransport {
            attempt: 7,
            url: "http://host/2024/3/a".to_string(),
            reason: "connection reset".to_string(),
        };
        assert_eq!(
            format!("{probe_error}"),
            "Probe 7 failed: http://host/2024/3/a: connection reset"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let upseek_error = UpseekError::from(io_error);

        match upseek_error {
            UpseekError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let upseek_error = UpseekError::from(toml_error);

        assert!(matches!(upseek_error, UpseekError::TomlParsing(_)));
        assert!(upseek_error.source().is_some());
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let upseek_error = UpseekError::from(json_error);

        assert!(matches!(upseek_error, UpseekError::Json(_)));
        assert!(format!("{upseek_error}").starts_with("JSON error:"));
    }

    #[test]
    fn test_is_transport() {
        assert!(UpseekError::Transport("refused".to_string()).is_transport());
        assert!(
            UpseekError::ProbeTransport {
                attempt: 1,
                url: "u".to_string(),
                reason: "r".to_string(),
            }
            .is_transport()
        );
        assert!(!UpseekError::UnexpectedStatus(500).is_transport());
        assert!(!UpseekError::Config("x".to_string()).is_transport());
    }

    #[test]
    fn test_error_no_source_variants() {
        let errors_without_source = vec![
            UpseekError::Config("test".to_string()),
            UpseekError::Transport("test".to_string()),
            UpseekError::UnexpectedStatus(418),
            UpseekError::ClockHeader("test".to_string()),
            UpseekError::UnsupportedAlgorithm("crc32".to_string()),
            UpseekError::InvalidArgument("test".to_string()),
        ];

        for error in errors_without_source {
            assert!(error.source().is_none());
            assert!(format!("{error}").contains(':'));
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UpseekError>();
    }

    #[test]
    fn test_reason_falls_back_to_display() {
        let err = UpseekError::Transport("dns failure".to_string());
        assert_eq!(err.reason(), "Transport error: dns failure");
    }
}
