//! Content fingerprints for function catalogues.
//!
//! A [`CatalogVersion`] is derived deterministically from the serialized
//! catalogue using SHA-256, so two catalogues with identical content always
//! share a version and any edit produces a new one.
//!
//! ```rust
//! use function_catalog::version::CatalogVersion;
//!
//! let a = CatalogVersion::from_content(br#"[{"function":"add"}]"#);
//! let b = CatalogVersion::from_content(br#"[{"function":"add"}]"#);
//! assert_eq!(a, b);
//! ```

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Opaque version identifier for a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogVersion {
    opaque: String,
}

impl CatalogVersion {
    /// Create a version from catalogue content.
    ///
    /// Uses the first 8 bytes of the SHA-256 digest, base64 encoded.
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        let hash = hasher.finalize();

        Self {
            opaque: BASE64.encode(&hash[..8]),
        }
    }

    /// Create a version from a pre-computed identifier.
    pub fn from_hash(hash: impl AsRef<str>) -> Self {
        Self {
            opaque: hash.as_ref().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.opaque
    }
}

impl fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.opaque)
    }
}

/// Error returned when parsing an empty version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Catalogue version cannot be empty")]
pub struct EmptyVersionError;

impl FromStr for CatalogVersion {
    type Err = EmptyVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyVersionError);
        }
        Ok(Self::from_hash(trimmed))
    }
}
