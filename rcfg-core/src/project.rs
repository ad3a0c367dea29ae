// rcfg-core/src/project.rs
use std::env;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

/// Environment variable holding the full RBE instance name.
pub const RBE_INSTANCE_ENV: &str = "RBE_instance";

lazy_static! {
    static ref RBE_INSTANCE_RE: Regex =
        Regex::new(r"^projects/([-\w]+)/instances/[-\w]+$").unwrap();
}

/// Extracts the project id from `projects/<project>/instances/<instance>`.
///
/// The whole string must match; anything else yields `None`.
pub fn rbe_project_from_instance(instance: &str) -> Option<String> {
    RBE_INSTANCE_RE
        .captures(instance)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Reads `RBE_instance` and extracts the project id from it.
pub fn rbe_project_from_env() -> Option<String> {
    let instance = env::var(RBE_INSTANCE_ENV).ok().filter(|s| !s.is_empty())?;
    let project = rbe_project_from_instance(&instance);
    if project.is_none() {
        debug!("{RBE_INSTANCE_ENV}={instance:?} does not name an RBE project");
    }
    project
}
