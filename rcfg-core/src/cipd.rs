// rcfg-core/src/cipd.rs
use std::fmt;
use std::fs;
use std::path::Path;

use rcfg_common::config::{Config, CIPD_METADATA_DIR};
use rcfg_common::error::{RcfgError, Result};
use tracing::{debug, info};

use crate::process;

const DIR_MODE: u32 = 0o755;

/// The cfg packages rcfg knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfgPackage {
    ChromiumBrowserClang,
    Nacl,
}

impl CfgPackage {
    /// Package name, also used as the install directory name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ChromiumBrowserClang => "chromium-browser-clang",
            Self::Nacl => "nacl",
        }
    }
}

impl fmt::Display for CfgPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A `revision/<rev>` label passed to `cipd install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRef(String);

impl RevisionRef {
    pub fn new(revision: &str) -> Self {
        Self(format!("revision/{revision}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Joins package path components with POSIX path-join rules.
///
/// A component starting with `/` restarts the path; a separator is only
/// inserted when the text so far does not already end with one.
pub fn package_path<S: AsRef<str>>(parts: &[S]) -> String {
    let mut path = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.starts_with('/') {
            path.clear();
        } else if !path.is_empty() && !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(part);
    }
    path
}

/// Creates `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(RcfgError::Config(format!(
                "{} exists but is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }
    debug!("Creating directory {} (mode {:o})", dir.display(), DIR_MODE);
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir).map_err(RcfgError::from)
}

fn is_cipd_root(dir: &Path) -> bool {
    dir.join(CIPD_METADATA_DIR).exists()
}

/// Installs `package` at `revision` into `dir` using the configured cipd.
pub fn cipd_install(config: &Config, package: &str, revision: &RevisionRef, dir: &Path) -> Result<()> {
    info!("install {} {} in {}", package, revision, dir.display());
    ensure_dir(dir)?;
    if !is_cipd_root(dir) {
        debug!("No {} in {}, initializing cipd root", CIPD_METADATA_DIR, dir.display());
        process::run_checked(&config.cipd_bin, &["init", "-force"], dir)?;
    }
    process::run_checked(&config.cipd_bin, &["install", package, revision.as_str()], dir)
}
