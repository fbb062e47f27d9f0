//! HTTP upload and probing
//!
//! This module holds the session abstraction shared by the upload and
//! probing steps, plus the two steps themselves.

pub mod probe;
pub mod session;
pub mod upload;

// Re-export commonly used items
pub use probe::{ProbeFailurePolicy, ProbeResponse, ProbeRunner};
pub use session::{HttpSession, ReqwestSession, SessionConfig, SessionResponse, UploadForm};
pub use upload::{UploadClient, parse_form_data, parse_server_clock};

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use super::session::{HttpSession, SessionResponse, UploadForm};
    use crate::core::constants::http_status;
    use crate::core::error::{Result, UpseekError};

    /// In-memory session answering from a fixed script.
    ///
    /// GETs answer 404 unless scripted; uploads fail at the transport level
    /// unless a response was set.
    #[derive(Default)]
    pub(crate) struct ScriptedSession {
        upload: Option<SessionResponse>,
        statuses: HashMap<String, u16>,
        failing: HashSet<String>,
        requests: Mutex<Vec<String>>,
        uploads: Mutex<Vec<(String, UploadForm)>>,
    }

    impl ScriptedSession {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_upload(mut self, response: SessionResponse) -> Self {
            self.upload = Some(response);
            self
        }

        pub(crate) fn with_status(mut self, url: &str, status: u16) -> Self {
            self.statuses.insert(url.to_string(), status);
            self
        }

        pub(crate) fn failing(mut self, url: &str) -> Self {
            self.failing.insert(url.to_string());
            self
        }

        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn uploads(&self) -> Vec<(String, UploadForm)> {
            self.uploads.lock().unwrap().clone()
        }

        pub(crate) fn form(file_name: &str) -> UploadForm {
            UploadForm {
                field_name: "file".to_string(),
                file_name: file_name.to_string(),
                contents: b"content".to_vec(),
                fields: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl HttpSession for ScriptedSession {
        async fn send_upload(&self, url: &str, form: UploadForm) -> Result<SessionResponse> {
            self.uploads.lock().unwrap().push((url.to_string(), form));
            self.upload
                .clone()
                .ok_or_else(|| UpseekError::Transport("connection refused".to_string()))
        }

        async fn fetch_status(&self, url: &str) -> Result<u16> {
            self.requests.lock().unwrap().push(url.to_string());
            if self.failing.contains(url) {
                return Err(UpseekError::Transport(format!("connection reset: {url}")));
            }
            Ok(self
                .statuses
                .get(url)
                .copied()
                .unwrap_or(http_status::NOT_FOUND))
        }
    }
}
