//! Release naming and on-disk layout of the data directory
//!
//! ```text
//! <data>/store/nu-<version>-<platform>.tar.gz   downloaded archive
//! <data>/store/nu-<version>-<platform>/nu       extracted binary
//! <data>/versions/<version>/bin/nu              resolved binary (link)
//! ```

use crate::platform::PlatformId;
use std::path::{Path, PathBuf};

/// File name of the interpreter executable
pub const BINARY_NAME: &str = "nu";

const PRODUCT: &str = "nu";
const ARCHIVE_EXT: &str = "tar.gz";
const RELEASE_DOWNLOAD_BASE: &str = "https://github.com/nushell/nushell/releases/download";

/// One published release archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    pub platform: PlatformId,
}

impl Release {
    pub fn new(version: impl Into<String>, platform: PlatformId) -> Self {
        Self {
            version: version.into(),
            platform,
        }
    }

    /// `nu-<version>-<platform>`, also the archive's top-level directory
    pub fn name(&self) -> String {
        format!("{}-{}-{}", PRODUCT, self.version, self.platform)
    }

    /// `nu-<version>-<platform>.tar.gz`
    pub fn archive_name(&self) -> String {
        format!("{}.{}", self.name(), ARCHIVE_EXT)
    }

    /// Path of the binary inside the archive
    pub fn archive_member(&self) -> String {
        format!("{}/{}", self.name(), BINARY_NAME)
    }

    /// Download URL of the archive
    pub fn url(&self) -> String {
        format!(
            "{}/{}/{}",
            RELEASE_DOWNLOAD_BASE,
            self.version,
            self.archive_name()
        )
    }
}

/// Paths inside the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    data_dir: PathBuf,
}

impl StoreLayout {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding archives and extracted releases
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn archive_path(&self, release: &Release) -> PathBuf {
        self.store_dir().join(release.archive_name())
    }

    pub fn extract_dir(&self, release: &Release) -> PathBuf {
        self.store_dir().join(release.name())
    }

    pub fn extracted_binary(&self, release: &Release) -> PathBuf {
        self.extract_dir(release).join(BINARY_NAME)
    }

    pub fn bin_dir(&self, version: &str) -> PathBuf {
        self.data_dir.join("versions").join(version).join("bin")
    }

    /// Final resolved binary for `version`
    pub fn binary_path(&self, version: &str) -> PathBuf {
        self.bin_dir(version).join(BINARY_NAME)
    }
}
