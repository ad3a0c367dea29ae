// rcfg-core/src/revision/nacl.rs
use rcfg_common::config::Config;
use rcfg_common::error::Result;
use tracing::debug;

use crate::process;

/// Reads the HEAD commit hash of the NaCl checkout.
///
/// A git failure (e.g. the directory is not a checkout) is returned as an
/// error; an empty hash is `Ok(None)`.
pub fn nacl_revision(config: &Config) -> Result<Option<String>> {
    let checkout = config.nacl_checkout_dir();
    debug!("Reading NaCl revision from {}", checkout.display());
    let hash = process::output_checked(
        &config.git_bin,
        &["log", "-1", "--format=%H"],
        &checkout,
    )?;
    if hash.is_empty() {
        Ok(None)
    } else {
        debug!("Detected NaCl revision {hash}");
        Ok(Some(hash))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;

    use rcfg_common::error::RcfgError;
    use tempfile::TempDir;

    use super::*;
    use crate::process::test_support::write_script;

    fn setup(git_body: &str) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let git = write_script(dir.path(), "fake-git", git_body);
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("native_client")).unwrap();
        let config = Config::from_parts(src, None, git.display().to_string(), "cipd".into());
        (dir, config)
    }

    #[test]
    fn returns_trimmed_hash() {
        let (_dir, config) = setup("echo 0123456789abcdef0123456789abcdef01234567");
        assert_eq!(
            nacl_revision(&config).unwrap(),
            Some("0123456789abcdef0123456789abcdef01234567".to_string())
        );
    }

    #[test]
    fn passes_log_arguments_and_checkout_cwd() {
        let (_dir, config) = setup(r#"[ "$*" = "log -1 --format=%H" ] || exit 9; basename "$PWD""#);
        assert_eq!(nacl_revision(&config).unwrap(), Some("native_client".to_string()));
    }

    #[test]
    fn empty_hash_is_none() {
        let (_dir, config) = setup("echo");
        assert_eq!(nacl_revision(&config).unwrap(), None);
    }

    #[test]
    fn git_failure_propagates() {
        let (_dir, config) = setup("echo 'fatal: not a git repository' >&2; exit 128");
        let err = nacl_revision(&config).unwrap_err();
        assert!(matches!(err, RcfgError::CommandFailed { .. }));
    }

    #[test]
    fn missing_checkout_is_an_error() {
        let (_dir, config) = setup("echo deadbeef");
        fs::remove_dir(config.nacl_checkout_dir()).unwrap();
        assert!(matches!(
            nacl_revision(&config),
            Err(RcfgError::CommandExecError(_))
        ));
    }
}
