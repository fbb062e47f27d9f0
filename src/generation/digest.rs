//! Hex digests used to guess hash-named uploads.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{Result, UpseekError};

/// Digest families servers commonly use to derive stored file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl DigestAlgorithm {
    /// Every supported algorithm, in candidate generation order
    pub const ALL: [DigestAlgorithm; 3] = [Self::Md5, Self::Sha1, Self::Sha256];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }

    /// Length of the hex encoding of one digest
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = UpseekError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            _ => Err(UpseekError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Lowercase hex digest of `plaintext`.
///
/// ```
/// use upseek::generation::digest::{digest, DigestAlgorithm};
///
/// assert_eq!(
///     digest(DigestAlgorithm::Md5, "abc"),
///     "900150983cd24fb0d6963f7d28e17f72"
/// );
/// ```
pub fn digest(algorithm: DigestAlgorithm, plaintext: impl AsRef<[u8]>) -> String {
    let bytes = plaintext.as_ref();
    match algorithm {
        DigestAlgorithm::Md5 => hex::encode(Md5::digest(bytes)),
        DigestAlgorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
        DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
    }
}

/// Like [`digest`], selecting the algorithm by name.
pub fn digest_named(name: &str, plaintext: impl AsRef<[u8]>) -> Result<String> {
    let algorithm = name.parse::<DigestAlgorithm>()?;
    Ok(digest(algorithm, plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_vectors() {
        assert_eq!(
            digest(DigestAlgorithm::Md5, ""),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            digest(DigestAlgorithm::Md5, "report"),
            "e98d2f001da5678b39482efbdf5770dc"
        );
    }

    #[test]
    fn test_sha1_vectors() {
        assert_eq!(
            digest(DigestAlgorithm::Sha1, "abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            digest(DigestAlgorithm::Sha1, "report"),
            "a27297bde9732f2e73fbc06db2611764e3ad9855"
        );
    }

    #[test]
    fn test_sha256_vectors() {
        assert_eq!(
            digest(DigestAlgorithm::Sha256, ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            digest(DigestAlgorithm::Sha256, "report"),
            "845e91831319e89c4d656bdb80c278ac09a7230d61e5dfd2e1b1fbb436ac8917"
        );
    }

    #[test]
    fn test_digest_lengths_match_hex_len() {
        for algorithm in DigestAlgorithm::ALL {
            let hex = digest(algorithm, "1709632800");
            assert_eq!(hex.len(), algorithm.hex_len(), "{algorithm}");
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(
            digest(DigestAlgorithm::Sha1, "report.pdf"),
            digest(DigestAlgorithm::Sha1, b"report.pdf")
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("md5".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Md5);
        assert_eq!("SHA1".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha1);
        assert_eq!(
            " sha256 ".parse::<DigestAlgorithm>().unwrap(),
            DigestAlgorithm::Sha256
        );
    }

    #[test]
    fn test_unsupported_algorithm() {
        let err = "crc32".parse::<DigestAlgorithm>().unwrap_err();
        assert!(matches!(err, UpseekError::UnsupportedAlgorithm(ref name) if name == "crc32"));

        assert!(digest_named("whirlpool", "x").is_err());
        assert_eq!(
            digest_named("md5", "report").unwrap(),
            "e98d2f001da5678b39482efbdf5770dc"
        );
    }

    #[test]
    fn test_generation_order() {
        let names: Vec<&str> = DigestAlgorithm::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["md5", "sha1", "sha256"]);
    }
}
