use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, info};
use std::path::Path;

use crate::core::constants::http_status;
use crate::core::error::{Result, UpseekError};
use crate::core::types::UploadOutcome;
use crate::http::session::{HttpSession, UploadForm};

const DATE_HEADER_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// Uploads the file and records the time window around the request.
pub struct UploadClient<'a, S: HttpSession + ?Sized> {
    session: &'a S,
    accepted_status: Vec<u16>,
}

impl<'a, S: HttpSession + ?Sized> UploadClient<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self {
            session,
            accepted_status: http_status::UPLOAD_ACCEPTED.to_vec(),
        }
    }

    /// Replace the status codes that count as a stored upload
    pub fn with_accepted_status(mut self, codes: Vec<u16>) -> Self {
        self.accepted_status = codes;
        self
    }

    pub fn accepted_status(&self) -> &[u16] {
        &self.accepted_status
    }

    /// Upload the file at `file_path` under the form field `field_name`.
    ///
    /// `extra_form_data` is a query string (`a=1&b=2`) merged into the form.
    pub async fn upload(
        &self,
        url: &str,
        field_name: &str,
        extra_form_data: Option<&str>,
        file_path: &Path,
    ) -> Result<UploadOutcome> {
        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                UpseekError::InvalidArgument(format!(
                    "'{}' does not name a file",
                    file_path.display()
                ))
            })?
            .to_string();

        let contents = tokio::fs::read(file_path).await?;
        debug!("Read {} bytes from {}", contents.len(), file_path.display());

        let form = UploadForm {
            field_name: field_name.to_string(),
            file_name,
            contents,
            fields: extra_form_data.map(parse_form_data).unwrap_or_default(),
        };

        self.upload_form(url, form).await
    }

    /// Send a prepared form and validate the response.
    pub async fn upload_form(&self, url: &str, form: UploadForm) -> Result<UploadOutcome> {
        let original_filename = form.file_name.clone();

        let lower_bound = Utc::now();
        let response = self.session.send_upload(url, form).await?;
        let upper_bound = Utc::now();

        info!(
            "Upload answered {} within {}..={}",
            response.status,
            lower_bound.timestamp(),
            upper_bound.timestamp()
        );

        if !self.accepted_status.contains(&response.status) {
            return Err(UpseekError::UnexpectedStatus(response.status));
        }

        let server_clock = response
            .date_header
            .as_deref()
            .map(parse_server_clock)
            .transpose()?;
        if let Some(clock) = server_clock {
            debug!("Server clock: {clock}");
        }

        Ok(UploadOutcome {
            lower_bound,
            upper_bound,
            server_clock,
            original_filename,
            status: response.status,
            body: response.body,
        })
    }
}

/// Decode a query string into form fields.
///
/// Pairs with empty values are dropped; a repeated key keeps its first
/// position and its last value.
pub fn parse_form_data(raw: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match fields.iter_mut().find(|(existing, _)| existing.as_str() == &*key) {
            Some(field) => field.1 = value.into_owned(),
            None => fields.push((key.into_owned(), value.into_owned())),
        }
    }

    fields
}

/// Parse a `Date` header into an absolute instant.
///
/// The leading weekday and trailing zone tokens are dropped and the rest read
/// as GMT, which also accepts servers that send a non-standard zone name or a
/// weekday that does not match the date.
pub fn parse_server_clock(value: &str) -> Result<DateTime<Utc>> {
    let mut tokens: Vec<&str> = value.split(' ').collect();
    tokens.pop();
    let date_and_time = tokens.get(1..).unwrap_or_default().join(" ");

    NaiveDateTime::parse_from_str(&date_and_time, DATE_HEADER_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| UpseekError::ClockHeader(format!("'{value}' ({e})")))
}
