//! Package metadata: the launcher version and the pinned Nushell version
//!
//! Both live in the crate version string as `<numake>+nu-<nushell>`.

use crate::error::{NumakeError, NumakeResult};
use semver::{BuildMetadata, Version};

/// Raw crate version, including build metadata
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

const NUSHELL_BUILD_PREFIX: &str = "nu-";

/// Versions read from package metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMeta {
    /// Version of numake itself
    pub numake_version: String,
    /// Pinned Nushell release
    pub nu_version: String,
}

impl PackageMeta {
    /// Metadata of the running build
    pub fn current() -> NumakeResult<Self> {
        Self::parse(PACKAGE_VERSION)
    }

    /// Parse a `<numake>+nu-<nushell>` version string
    pub fn parse(raw: &str) -> NumakeResult<Self> {
        let invalid = |reason: String| NumakeError::InvalidPackageVersion {
            version: raw.to_string(),
            reason,
        };

        let version = Version::parse(raw).map_err(|e| invalid(e.to_string()))?;

        let nu_version = version
            .build
            .as_str()
            .strip_prefix(NUSHELL_BUILD_PREFIX)
            .ok_or_else(|| invalid("missing nu-<version> build metadata".to_string()))?;
        Version::parse(nu_version).map_err(|e| invalid(format!("nushell version: {}", e)))?;

        let numake_version = Version {
            build: BuildMetadata::EMPTY,
            ..version.clone()
        };

        Ok(Self {
            numake_version: numake_version.to_string(),
            nu_version: nu_version.to_string(),
        })
    }
}
