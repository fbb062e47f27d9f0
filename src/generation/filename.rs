/// A file name split at its last dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitName<'a> {
    pub stem: &'a str,
    /// Extension including the leading dot, empty when there is none
    pub extension: &'a str,
}

impl SplitName<'_> {
    pub fn has_extension(&self) -> bool {
        !self.extension.is_empty()
    }
}

/// Split a base file name into stem and extension.
///
/// Leading dots never start an extension, so `.bashrc` and `..cfg` have
/// none, while `archive.tar.gz` splits into `archive.tar` and `.gz`.
pub fn split_extension(filename: &str) -> SplitName<'_> {
    if let Some(dot) = filename.rfind('.')
        && filename[..dot].bytes().any(|b| b != b'.')
    {
        return SplitName {
            stem: &filename[..dot],
            extension: &filename[dot..],
        };
    }

    SplitName {
        stem: filename,
        extension: "",
    }
}
