// rcfg-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{RcfgError, Result};

const CFGS_SUBDIR: &str = "buildtools/reclient_cfgs";
const CLANG_UPDATE_SCRIPT: &str = "tools/clang/scripts/update.py";
const NACL_CHECKOUT: &str = "native_client";
const DEFAULT_GIT_BIN: &str = "git";
const DEFAULT_CIPD_BIN: &str = "cipd";

/// Name of the metadata directory `cipd init` creates inside a root.
pub const CIPD_METADATA_DIR: &str = ".cipd";

#[derive(Debug, Clone)]
pub struct Config {
    pub src_root: PathBuf,
    pub cfgs_dir: PathBuf,
    pub git_bin: String,
    pub cipd_bin: String,
    /// Set when `cfgs_dir` came from `RCFG_CFGS_DIR` and must not follow `src_root`.
    cfgs_dir_pinned: bool,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading rcfg configuration");

        let src_root = match non_empty_var("RCFG_SRC_ROOT") {
            Some(root) => PathBuf::from(root),
            None => {
                let cwd = env::current_dir().map_err(|e| {
                    RcfgError::Config(format!("Could not determine current directory: {e}"))
                })?;
                debug!(
                    "RCFG_SRC_ROOT not set or empty, using current directory: {}",
                    cwd.display()
                );
                cwd
            }
        };

        let pinned_cfgs_dir = non_empty_var("RCFG_CFGS_DIR").map(PathBuf::from);
        let git_bin = non_empty_var("RCFG_GIT").unwrap_or_else(|| DEFAULT_GIT_BIN.to_string());
        let cipd_bin = non_empty_var("RCFG_CIPD").unwrap_or_else(|| DEFAULT_CIPD_BIN.to_string());

        let config = Self::from_parts(src_root, pinned_cfgs_dir, git_bin, cipd_bin);
        debug!(
            "Effective source root: {}, cfgs dir: {}",
            config.src_root.display(),
            config.cfgs_dir.display()
        );
        Ok(config)
    }

    /// Builds a config without consulting the environment.
    pub fn from_parts(
        src_root: PathBuf,
        cfgs_dir: Option<PathBuf>,
        git_bin: String,
        cipd_bin: String,
    ) -> Self {
        let cfgs_dir_pinned = cfgs_dir.is_some();
        let cfgs_dir = cfgs_dir.unwrap_or_else(|| src_root.join(CFGS_SUBDIR));
        Self {
            src_root,
            cfgs_dir,
            git_bin,
            cipd_bin,
            cfgs_dir_pinned,
        }
    }

    /// Re-roots the config at `src_root`. A pinned cfgs directory stays put.
    pub fn with_src_root(mut self, src_root: PathBuf) -> Self {
        if !self.cfgs_dir_pinned {
            self.cfgs_dir = src_root.join(CFGS_SUBDIR);
        }
        self.src_root = src_root;
        self
    }

    pub fn src_root(&self) -> &Path {
        &self.src_root
    }

    pub fn cfgs_dir(&self) -> &Path {
        &self.cfgs_dir
    }

    pub fn clang_update_script(&self) -> PathBuf {
        self.src_root.join(CLANG_UPDATE_SCRIPT)
    }

    pub fn nacl_checkout_dir(&self) -> PathBuf {
        self.src_root.join(NACL_CHECKOUT)
    }

    pub fn package_dir(&self, package_name: &str) -> PathBuf {
        self.cfgs_dir.join(package_name)
    }
}
