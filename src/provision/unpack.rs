//! Unpacking the interpreter binary from a release archive

use crate::error::{NumakeError, NumakeResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Extracts a single archive member into a directory
#[async_trait]
pub trait Unpacker: Send + Sync {
    /// Extract `member` from `archive` into `dest`, dropping the member's
    /// top-level directory so the file lands directly in `dest`.
    async fn unpack(&self, archive: &Path, member: &str, dest: &Path) -> NumakeResult<()>;
}

/// Unpacker that shells out to `tar`
#[derive(Debug, Clone, Copy, Default)]
pub struct TarUnpacker;

fn extraction_error(archive: &Path, reason: impl Into<String>) -> NumakeError {
    NumakeError::Extraction {
        archive: archive.to_path_buf(),
        reason: reason.into(),
    }
}

#[async_trait]
impl Unpacker for TarUnpacker {
    async fn unpack(&self, archive: &Path, member: &str, dest: &Path) -> NumakeResult<()> {
        tokio::fs::create_dir_all(dest)
            .await
            .map_err(|e| NumakeError::io(format!("creating directory {}", dest.display()), e))?;

        let output = Command::new("tar")
            .arg("-xzf")
            .arg(archive)
            .arg("-C")
            .arg(dest)
            .arg("--strip-components=1")
            .arg(member)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| extraction_error(archive, format!("failed to run tar: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = if stderr.trim().is_empty() {
                format!("tar exited with {}", output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(extraction_error(archive, reason));
        }

        let file_name = member.rsplit('/').next().unwrap_or(member);
        if !dest.join(file_name).is_file() {
            return Err(extraction_error(
                archive,
                format!("archive has no entry {}", member),
            ));
        }

        Ok(())
    }
}
