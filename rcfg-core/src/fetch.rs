// rcfg-core/src/fetch.rs
use rcfg_common::config::Config;
use rcfg_common::error::{RcfgError, Result};
use tracing::{info, warn};

use crate::cipd::{self, CfgPackage, RevisionRef};
use crate::revision;

pub const DEFAULT_CIPD_PREFIX: &str = "infra_internal/rbe/reclient_cfgs";

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub rbe_project: String,
    pub cipd_prefix: String,
}

impl FetchRequest {
    /// Builds a request; an empty project id counts as missing.
    pub fn new(rbe_project: Option<String>, cipd_prefix: impl Into<String>) -> Result<Self> {
        let rbe_project = rbe_project
            .filter(|p| !p.is_empty())
            .ok_or(RcfgError::ProjectNotSpecified)?;
        Ok(Self {
            rbe_project,
            cipd_prefix: cipd_prefix.into(),
        })
    }
}

/// Outcome of a fetch that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub installed: Vec<(CfgPackage, RevisionRef)>,
    pub skipped: Vec<CfgPackage>,
}

impl FetchReport {
    pub fn is_installed(&self, package: CfgPackage) -> bool {
        self.installed.iter().any(|(p, _)| *p == package)
    }
}

fn install(
    config: &Config,
    project_prefix: &str,
    package: CfgPackage,
    revision: &str,
    report: &mut FetchReport,
) -> Result<()> {
    let name = cipd::package_path(&[project_prefix, package.name()]);
    let revision = RevisionRef::new(revision);
    cipd::cipd_install(config, &name, &revision, &config.package_dir(package.name()))?;
    report.installed.push((package, revision));
    Ok(())
}

/// Installs the clang and NaCl cfg packages for `request.rbe_project`.
///
/// Undetectable revisions are logged and skipped; tool failures abort.
pub fn fetch_cfgs(config: &Config, request: &FetchRequest) -> Result<FetchReport> {
    info!("fetch reclient_cfgs for RBE project {}...", request.rbe_project);

    let project_prefix = cipd::package_path(&[&request.cipd_prefix, &request.rbe_project]);
    let mut report = FetchReport::default();

    match revision::clang_revision(config) {
        Some(rev) => install(config, &project_prefix, CfgPackage::ChromiumBrowserClang, &rev, &mut report)?,
        None => {
            warn!("failed to detect clang revision");
            report.skipped.push(CfgPackage::ChromiumBrowserClang);
        }
    }

    match revision::nacl_revision(config)? {
        Some(rev) => install(config, &project_prefix, CfgPackage::Nacl, &rev, &mut report)?,
        None => {
            warn!("failed to detect nacl revision");
            report.skipped.push(CfgPackage::Nacl);
        }
    }

    Ok(report)
}
