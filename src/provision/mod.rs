//! Version-pinned Nushell provisioning
//!
//! Ensures a runnable `nu` for a (version, platform) pair exists in the data
//! directory. Work is skipped stage by stage: an installed binary returns
//! immediately, a cached archive skips the download, and an extracted
//! binary only needs linking.

pub mod fetch;
pub mod layout;
pub mod unpack;

pub use fetch::{ArchiveFetcher, HttpFetcher};
pub use layout::{Release, StoreLayout, BINARY_NAME};
pub use unpack::{TarUnpacker, Unpacker};

use crate::error::{NumakeError, NumakeResult};
use crate::log::Logger;
use crate::nushell::Nushell;
use crate::platform::PlatformId;
use crate::ui::{DownloadSpinner, UiContext};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What the data directory already holds for a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// The resolved binary exists
    Installed,
    /// The binary is extracted in the store but not linked
    Extracted,
    /// Only the archive is in the store
    Archived,
    /// Nothing cached
    Empty,
}

/// Downloads, unpacks and links pinned Nushell releases
pub struct Provisioner<'a> {
    layout: StoreLayout,
    fetcher: Box<dyn ArchiveFetcher>,
    unpacker: Box<dyn Unpacker>,
    logger: &'a Logger,
}

impl<'a> Provisioner<'a> {
    /// Provisioner using HTTPS downloads and the system `tar`
    pub fn new(layout: StoreLayout, logger: &'a Logger) -> Self {
        Self::with_backends(
            layout,
            Box::new(HttpFetcher::new()),
            Box::new(TarUnpacker),
            logger,
        )
    }

    pub fn with_backends(
        layout: StoreLayout,
        fetcher: Box<dyn ArchiveFetcher>,
        unpacker: Box<dyn Unpacker>,
        logger: &'a Logger,
    ) -> Self {
        Self {
            layout,
            fetcher,
            unpacker,
            logger,
        }
    }

    /// Classify the cache for `release`
    pub fn cache_state(&self, release: &Release) -> CacheState {
        if self.is_installed(release) {
            CacheState::Installed
        } else if self.layout.extracted_binary(release).is_file() {
            CacheState::Extracted
        } else if self.layout.archive_path(release).is_file() {
            CacheState::Archived
        } else {
            CacheState::Empty
        }
    }

    /// The resolved binary exists and, when it is a link, points into this
    /// release's store directory. A link left by another platform sharing the
    /// data directory does not count.
    fn is_installed(&self, release: &Release) -> bool {
        let binary = self.layout.binary_path(&release.version);
        if !binary.exists() {
            return false;
        }
        match std::fs::read_link(&binary) {
            Ok(target) => std::path::absolute(self.layout.extracted_binary(release))
                .is_ok_and(|expected| expected == target),
            // Plain file, as copied on platforms without symlinks
            Err(_) => true,
        }
    }

    /// Ensure `nu` for `version` on `platform` is installed and return its path
    pub async fn provision(&self, version: &str, platform: PlatformId) -> NumakeResult<PathBuf> {
        let release = Release::new(version, platform);
        let binary = std::path::absolute(self.layout.binary_path(version))
            .map_err(|e| NumakeError::io("resolving data directory", e))?;

        self.logger.info(format_args!("nushell version: {}", version));
        self.logger.info(format_args!(
            "data directory: {}",
            self.layout.data_dir().display()
        ));

        let state = self.cache_state(&release);
        self.logger
            .debug(format_args!("cache state for {}: {:?}", release.name(), state));

        match state {
            CacheState::Installed => {
                self.logger
                    .info("found matching nushell version, skipping install");
                return Ok(binary);
            }
            CacheState::Extracted => {
                self.logger.info("found extracted release in store, linking");
            }
            CacheState::Archived => {
                self.logger.info("found release in store, skipping download");
                self.extract(&release).await?;
            }
            CacheState::Empty => {
                self.logger
                    .info("release does not exist in store, downloading...");
                self.download(&release).await?;
                self.extract(&release).await?;
            }
        }

        self.link(&release, &binary).await?;
        Ok(binary)
    }

    async fn download(&self, release: &Release) -> NumakeResult<()> {
        let store = self.layout.store_dir();
        tokio::fs::create_dir_all(&store)
            .await
            .map_err(|e| NumakeError::io(format!("creating directory {}", store.display()), e))?;

        let url = release.url();
        self.logger.debug(format_args!("GET {}", url));

        let spinner = DownloadSpinner::start(&UiContext::detect(self.logger), &release.archive_name());
        let bytes = self.fetcher.fetch(&url).await;
        spinner.finish();
        let bytes = bytes?;

        let archive = self.layout.archive_path(release);
        self.logger.debug(format_args!(
            "writing {} bytes to {}",
            bytes.len(),
            archive.display()
        ));
        write_atomic(&store, &archive, bytes).await
    }

    /// Unpack into a scratch directory in the store, then move it to the
    /// release directory, so an interrupted extraction is never mistaken for
    /// a finished one.
    async fn extract(&self, release: &Release) -> NumakeResult<()> {
        self.logger.info("extracting nushell binary...");
        let archive = self.layout.archive_path(release);
        let dest = self.layout.extract_dir(release);
        let store = self.layout.store_dir();

        tokio::fs::create_dir_all(&store)
            .await
            .map_err(|e| NumakeError::io(format!("creating directory {}", store.display()), e))?;
        let staging = tempfile::Builder::new()
            .prefix(".extract-")
            .tempdir_in(&store)
            .map_err(|e| NumakeError::io(format!("creating directory in {}", store.display()), e))?;

        self.unpacker
            .unpack(&archive, &release.archive_member(), staging.path())
            .await?;

        // Leftover without a binary, e.g. from an older numake
        if dest.is_dir() && !self.layout.extracted_binary(release).is_file() {
            tokio::fs::remove_dir_all(&dest)
                .await
                .map_err(|e| NumakeError::io(format!("removing {}", dest.display()), e))?;
        }

        self.logger.debug(format_args!(
            "moving {} to {}",
            staging.path().display(),
            dest.display()
        ));
        match tokio::fs::rename(staging.path(), &dest).await {
            Ok(()) => Ok(()),
            // Another run finished the same extraction first
            Err(_) if self.layout.extracted_binary(release).is_file() => {
                self.logger
                    .debug("release was extracted concurrently, keeping existing copy");
                Ok(())
            }
            Err(e) => Err(NumakeError::io(format!("moving into {}", dest.display()), e)),
        }
    }

    /// Point the resolved binary path at the extracted binary.
    ///
    /// The link is built under a scratch name in `bin_dir` and renamed over
    /// `binary`, which replaces any existing or dangling link in one step.
    async fn link(&self, release: &Release, binary: &Path) -> NumakeResult<()> {
        let target = std::path::absolute(self.layout.extracted_binary(release))
            .map_err(|e| NumakeError::io("resolving store path", e))?;
        make_executable(&target)?;

        let bin_dir = self.layout.bin_dir(&release.version);
        tokio::fs::create_dir_all(&bin_dir)
            .await
            .map_err(|e| NumakeError::io(format!("creating directory {}", bin_dir.display()), e))?;

        self.logger.debug(format_args!(
            "linking {} -> {}",
            binary.display(),
            target.display()
        ));

        let staging = tempfile::Builder::new()
            .prefix(".link-")
            .tempdir_in(&bin_dir)
            .map_err(|e| NumakeError::io(format!("creating directory in {}", bin_dir.display()), e))?;
        let staged = staging.path().join(BINARY_NAME);

        #[cfg(unix)]
        tokio::fs::symlink(&target, &staged)
            .await
            .map_err(|e| NumakeError::io(format!("linking {}", staged.display()), e))?;

        #[cfg(not(unix))]
        tokio::fs::copy(&target, &staged)
            .await
            .map(|_| ())
            .map_err(|e| NumakeError::io(format!("copying {}", staged.display()), e))?;

        tokio::fs::rename(&staged, binary)
            .await
            .map_err(|e| NumakeError::io(format!("linking {}", binary.display()), e))
    }
}

/// Write `bytes` to `path` through a temporary file in `dir` and a rename
async fn write_atomic(dir: &Path, path: &Path, bytes: Vec<u8>) -> NumakeResult<()> {
    let dir = dir.to_path_buf();
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let context = || format!("writing {}", path.display());

        let mut file = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| NumakeError::io(context(), e))?;
        file.write_all(&bytes)
            .map_err(|e| NumakeError::io(context(), e))?;
        file.persist(&path)
            .map_err(|e| NumakeError::io(context(), e.error))?;
        Ok(())
    })
    .await
    .map_err(|e| NumakeError::Internal(format!("write task failed: {}", e)))?
}

fn make_executable(path: &Path) -> NumakeResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = std::fs::metadata(path)
            .map_err(|e| NumakeError::io(format!("reading {}", path.display()), e))?;
        let mut perms = metadata.permissions();
        if perms.mode() & 0o111 == 0 {
            perms.set_mode(perms.mode() | 0o755);
            std::fs::set_permissions(path, perms)
                .map_err(|e| NumakeError::io(format!("chmod {}", path.display()), e))?;
        }
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Check that the binary at `bin` reports exactly `expected` as its version
pub async fn verify_version(bin: &Path, expected: &str, logger: &Logger) -> NumakeResult<()> {
    let reported = Nushell::new(bin, logger).version().await?;
    logger.debug(format_args!("nushell reports version {}", reported));

    if reported == expected {
        Ok(())
    } else {
        Err(NumakeError::VersionMismatch {
            expected: expected.to_string(),
            reported,
        })
    }
}
