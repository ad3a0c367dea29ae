// rcfg-core/src/lib.rs

pub mod cipd;
pub mod fetch;
pub mod process;
pub mod project;
pub mod revision;

// Re-export key types for easier use by the CLI crate
pub use cipd::{package_path, CfgPackage, RevisionRef};
pub use fetch::{fetch_cfgs, FetchReport, FetchRequest, DEFAULT_CIPD_PREFIX};
pub use project::{rbe_project_from_env, rbe_project_from_instance, RBE_INSTANCE_ENV};
