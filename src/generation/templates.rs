//! Date-based folder and file name templates.
//!
//! Placeholders: `{y}` year, `{m}` month, `{d}` day, `{name}` file stem,
//! `{ext}` extension. Unknown placeholders are kept literally.

use chrono::{Datelike, NaiveDate};

/// Date folders a name is placed under, in probing order.
pub const FOLDER_TEMPLATES: [&str; 7] = [
    "{y}/{m}/",
    "{d}/{m}/{y}/",
    "{y}/{m}/{d}/",
    "{y}/{d}/{m}/",
    "{y}{m}{d}/",
    "{y}{m}/",
    "{y}/",
];

/// File names carrying the date as a prefix, in probing order.
pub const DATED_NAME_TEMPLATES: [&str; 7] = [
    "{y}-{m}_{name}{ext}",
    "{d}-{m}-{y}_{name}{ext}",
    "{y}-{m}-{d}_{name}{ext}",
    "{y}-{d}-{m}_{name}{ext}",
    "{y}{m}{d}_{name}{ext}",
    "{y}{m}_{name}{ext}",
    "{y}_{name}{ext}",
];

/// Rendered date components for one reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl DateParts {
    /// Numeric rendering without padding (`2024`, `3`, `5`)
    pub fn plain(date: NaiveDate) -> Self {
        Self {
            year: date.year().to_string(),
            month: date.month().to_string(),
            day: date.day().to_string(),
        }
    }

    /// Two-digit month and day (`2024`, `03`, `05`)
    pub fn padded(date: NaiveDate) -> Self {
        Self {
            year: date.year().to_string(),
            month: format!("{:02}", date.month()),
            day: format!("{:02}", date.day()),
        }
    }

    /// Whether padding changes the rendering of `date`
    pub fn needs_padding(date: NaiveDate) -> bool {
        date.month() < 10 || date.day() < 10
    }
}

/// Render a folder template for `parts`.
pub fn render_folder(template: &str, parts: &DateParts) -> String {
    render(template, parts, "", "")
}

/// Render a dated file name template for `parts`.
pub fn render_dated_name(template: &str, parts: &DateParts, name: &str, ext: &str) -> String {
    render(template, parts, name, ext)
}

// Single pass so substituted values are never re-expanded.
fn render(template: &str, parts: &DateParts, name: &str, ext: &str) -> String {
    let mut out = String::with_capacity(template.len() + name.len() + ext.len() + 8);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        let Some(close) = after.find('}') else {
            out.push_str(after);
            return out;
        };

        let value = match &after[1..close] {
            "y" => Some(parts.year.as_str()),
            "m" => Some(parts.month.as_str()),
            "d" => Some(parts.day.as_str()),
            "name" => Some(name),
            "ext" => Some(ext),
            _ => None,
        };
        match value {
            Some(value) => out.push_str(value),
            None => out.push_str(&after[..=close]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_fifth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_plain_and_padded_parts() {
        let plain = DateParts::plain(march_fifth());
        assert_eq!((plain.year.as_str(), plain.month.as_str(), plain.day.as_str()), ("2024", "3", "5"));

        let padded = DateParts::padded(march_fifth());
        assert_eq!((padded.month.as_str(), padded.day.as_str()), ("03", "05"));
    }

    #[test]
    fn test_needs_padding() {
        assert!(DateParts::needs_padding(march_fifth()));
        assert!(DateParts::needs_padding(NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()));
        assert!(DateParts::needs_padding(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
        assert!(!DateParts::needs_padding(NaiveDate::from_ymd_opt(2024, 11, 15).unwrap()));
    }

    #[test]
    fn test_render_every_folder_template() {
        let parts = DateParts::plain(march_fifth());
        let rendered: Vec<String> = FOLDER_TEMPLATES
            .iter()
            .map(|t| render_folder(t, &parts))
            .collect();

        assert_eq!(
            rendered,
            vec![
                "2024/3/",
                "5/3/2024/",
                "2024/3/5/",
                "2024/5/3/",
                "202435/",
                "20243/",
                "2024/",
            ]
        );
    }

    #[test]
    fn test_render_padded_folder() {
        let parts = DateParts::padded(march_fifth());
        assert_eq!(render_folder("{y}{m}{d}/", &parts), "20240305/");
        assert_eq!(render_folder("{d}/{m}/{y}/", &parts), "05/03/2024/");
    }

    #[test]
    fn test_render_dated_names() {
        let parts = DateParts::plain(march_fifth());
        assert_eq!(
            render_dated_name(DATED_NAME_TEMPLATES[2], &parts, "report", ".pdf"),
            "2024-3-5_report.pdf"
        );
        assert_eq!(
            render_dated_name(DATED_NAME_TEMPLATES[6], &parts, "report", ""),
            "2024_report"
        );
    }

    #[test]
    fn test_substituted_values_are_not_expanded() {
        let parts = DateParts::plain(march_fifth());
        assert_eq!(
            render_dated_name("{y}_{name}{ext}", &parts, "{y}", ".{m}"),
            "2024_{y}.{m}"
        );
    }

    #[test]
    fn test_unknown_and_unclosed_placeholders() {
        let parts = DateParts::plain(march_fifth());
        assert_eq!(render_folder("{q}/{y}/", &parts), "{q}/2024/");
        assert_eq!(render_folder("{y}/{m", &parts), "2024/{m");
    }
}
