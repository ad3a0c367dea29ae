// rcfg/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use rcfg_common::error::Result;
use rcfg_common::Config;
use rcfg_core::{fetch_cfgs, rbe_project_from_env, FetchReport, FetchRequest, DEFAULT_CIPD_PREFIX};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, name = "rcfg", bin_name = "rcfg")]
#[command(about = "fetch reclient cfgs")]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// RBE instance project id (default: project of $RBE_instance)
    #[arg(long = "rbe_project", value_name = "PROJECT")]
    pub rbe_project: Option<String>,

    /// cipd package name prefix
    #[arg(long = "cipd_prefix", value_name = "PREFIX", default_value = DEFAULT_CIPD_PREFIX)]
    pub cipd_prefix: String,

    /// Source checkout root (default: $RCFG_SRC_ROOT or the current directory)
    #[arg(long = "src_root", value_name = "DIR")]
    pub src_root: Option<PathBuf>,
}

impl CliArgs {
    /// The project id from the flag, falling back to `RBE_instance`.
    pub fn resolved_project(&self) -> Option<String> {
        match &self.rbe_project {
            Some(project) => Some(project.clone()),
            None => rbe_project_from_env(),
        }
    }

    pub fn run(&self, config: Config) -> Result<FetchReport> {
        let request = FetchRequest::new(self.resolved_project(), self.cipd_prefix.clone())?;
        let config = match &self.src_root {
            Some(root) => config.with_src_root(root.clone()),
            None => config,
        };
        debug!("Fetching with {:?}", request);
        fetch_cfgs(&config, &request)
    }
}
