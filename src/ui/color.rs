//! Terminal colors for the text report

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Wrap `text` in `color` when stdout is a capable terminal
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{color}{text}{}", Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Whether ANSI colors and emoji should be written to stdout
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var_os("NO_COLOR").is_some() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }
    if env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    if cfg!(test) || !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !term.is_empty() && term != "dumb",
        Err(_) => env::var_os("TERM_PROGRAM").is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_plain_in_tests() {
        // FORCE_COLOR may leak in from CI; only assert when it is unset
        if std::env::var_os("FORCE_COLOR").is_none() {
            assert_eq!(colorize("found", Colors::GREEN), "found");
        }
    }

    #[test]
    fn test_colors_are_ansi_sequences() {
        for code in [
            Colors::RESET,
            Colors::BOLD,
            Colors::DIM,
            Colors::RED,
            Colors::GREEN,
            Colors::YELLOW,
            Colors::CYAN,
        ] {
            assert!(code.starts_with("\x1b["));
            assert!(code.ends_with('m'));
        }
    }
}
