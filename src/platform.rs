//! Host platform detection
//!
//! Maps the running OS and CPU architecture to the target triple used in
//! Nushell release archive names.

use crate::error::{NumakeError, NumakeResult};
use crate::log::Logger;
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;

/// Release target triples published for Nushell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformId {
    Aarch64Darwin,
    Aarch64LinuxGnu,
    X64Darwin,
    X64LinuxGnu,
    X64LinuxMusl,
}

impl PlatformId {
    /// Target triple as it appears in release file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aarch64Darwin => "aarch64-apple-darwin",
            Self::Aarch64LinuxGnu => "aarch64-unknown-linux-gnu",
            Self::X64Darwin => "x86_64-apple-darwin",
            Self::X64LinuxGnu => "x86_64-unknown-linux-gnu",
            Self::X64LinuxMusl => "x86_64-unknown-linux-musl",
        }
    }

    /// All supported platforms
    pub fn all() -> &'static [Self] {
        &[
            Self::Aarch64Darwin,
            Self::Aarch64LinuxGnu,
            Self::X64Darwin,
            Self::X64LinuxGnu,
            Self::X64LinuxMusl,
        ]
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_arm64(arch: &str) -> bool {
    matches!(arch, "aarch64" | "arm64")
}

/// Map an OS family, architecture and libc flavour to a platform.
///
/// On Linux, musl always maps to `x86_64-unknown-linux-musl` whatever the
/// architecture: no aarch64 musl build is in the supported set.
pub fn platform_for(os: &str, arch: &str, is_musl: bool) -> NumakeResult<PlatformId> {
    match os {
        "macos" | "darwin" => Ok(if is_arm64(arch) {
            PlatformId::Aarch64Darwin
        } else {
            PlatformId::X64Darwin
        }),
        "linux" => Ok(if is_musl {
            PlatformId::X64LinuxMusl
        } else if is_arm64(arch) {
            PlatformId::Aarch64LinuxGnu
        } else {
            PlatformId::X64LinuxGnu
        }),
        other => Err(NumakeError::UnsupportedPlatform(other.to_string())),
    }
}

/// Resolve the platform of the running host
pub async fn resolve_platform(logger: &Logger) -> NumakeResult<PlatformId> {
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    logger.debug(format_args!("host: os={} arch={}", os, arch));

    let musl = if os == "linux" {
        detect_musl(logger).await
    } else {
        false
    };

    platform_for(os, arch, musl)
}

/// Probe the dynamic loader for musl libc.
///
/// musl's `ldd` prints its banner to stderr and exits non-zero, so the exit
/// status is ignored. A missing `ldd` counts as glibc.
async fn detect_musl(logger: &Logger) -> bool {
    let output = Command::new("ldd")
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match output {
        Ok(output) => {
            let musl = mentions_musl(&output.stderr) || mentions_musl(&output.stdout);
            logger.debug(format_args!("ldd --version reports musl: {}", musl));
            musl
        }
        Err(e) => {
            logger.debug(format_args!("ldd not available ({}), assuming glibc", e));
            false
        }
    }
}

fn mentions_musl(stream: &[u8]) -> bool {
    String::from_utf8_lossy(stream).contains("musl")
}
