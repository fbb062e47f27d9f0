use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::core::constants::{session, timeouts};
use crate::core::error::{Result, UpseekError};

/// Multipart upload body: one file part plus plain text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    /// Form field name of the file part
    pub field_name: String,
    /// File name announced for the file part
    pub file_name: String,
    pub contents: Vec<u8>,
    /// Extra text fields, sent before the file part
    pub fields: Vec<(String, String)>,
}

/// The parts of an HTTP response the upload step cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub status: u16,
    /// Raw `Date` header value, if the server sent one
    pub date_header: Option<String>,
    pub body: String,
}

/// A shared HTTP session used for the upload and every probe.
///
/// Implementations keep headers and cookies fixed for the whole run.
#[async_trait]
pub trait HttpSession: Send + Sync {
    /// POST `form` as multipart/form-data
    async fn send_upload(&self, url: &str, form: UploadForm) -> Result<SessionResponse>;

    /// GET `url` and return the final status code
    async fn fetch_status(&self, url: &str) -> Result<u16>;
}

/// Settings applied to every request of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub user_agent: String,
    /// Extra headers as (name, value)
    pub headers: Vec<(String, String)>,
    /// Raw cookie string sent as the `Cookie` header
    pub cookies: Option<String>,
    pub timeout: Duration,
    pub proxy: Option<String>,
    pub insecure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: session::DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
            cookies: None,
            timeout: Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS),
            proxy: None,
            insecure: false,
        }
    }
}

/// Parse a `Name: value` header line.
///
/// Only the first colon separates name from value, so values may contain colons.
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw.split_once(':').ok_or_else(|| {
        UpseekError::InvalidArgument(format!(
            "Header '{raw}' is malformed. Expected the form 'Name: value'."
        ))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(UpseekError::InvalidArgument(format!(
            "Header '{raw}' has an empty name."
        )));
    }

    Ok((name.to_string(), value.trim_start().to_string()))
}

/// [`HttpSession`] backed by a single pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestSession {
    client: reqwest::Client,
}

impl ReqwestSession {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                UpseekError::InvalidArgument(format!("Invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                UpseekError::InvalidArgument(format!("Invalid value for header '{name}': {e}"))
            })?;
            default_headers.insert(name, value);
        }

        if let Some(ref cookies) = config.cookies {
            let value = HeaderValue::from_str(cookies).map_err(|e| {
                UpseekError::InvalidArgument(format!("Invalid cookie string: {e}"))
            })?;
            default_headers.insert(header::COOKIE, value);
        }

        let mut client_builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(timeouts::MAX_REDIRECTS))
            .user_agent(config.user_agent.as_str())
            .default_headers(default_headers);

        if config.insecure {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                UpseekError::Config(format!("Invalid proxy URL '{proxy_url}': {e}"))
            })?;
            client_builder = client_builder.proxy(proxy);
        }

        Ok(Self {
            client: client_builder.build()?,
        })
    }
}

#[async_trait]
impl HttpSession for ReqwestSession {
    async fn send_upload(&self, url: &str, form: UploadForm) -> Result<SessionResponse> {
        let mut multipart = Form::new();
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }
        let part = Part::bytes(form.contents).file_name(form.file_name);
        multipart = multipart.part(form.field_name, part);

        let response = self.client.post(url).multipart(multipart).send().await?;
        let status = response.status().as_u16();
        let date_header = response
            .headers()
            .get(header::DATE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(SessionResponse {
            status,
            date_header,
            body,
        })
    }

    async fn fetch_status(&self, url: &str) -> Result<u16> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        // Drain so the pooled connection can be reused
        let _ = response.bytes().await;

        Ok(status)
    }
}
