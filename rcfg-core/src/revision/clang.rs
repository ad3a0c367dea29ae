// rcfg-core/src/revision/clang.rs
use std::fs;
use std::io;

use lazy_static::lazy_static;
use rcfg_common::config::Config;
use regex::{Captures, Regex};
use tracing::{debug, warn};

lazy_static! {
    static ref PACKAGE_VERSION_LITERAL_RE: Regex =
        Regex::new(r#"(?m)^PACKAGE_VERSION\s*=\s*(?:'([^']*)'|"([^"]*)")\s*(?:#.*)?$"#).unwrap();
    static ref PACKAGE_VERSION_COMPOSED_RE: Regex = Regex::new(
        r#"(?m)^PACKAGE_VERSION\s*=\s*(?:'%s-%s'|"%s-%s")\s*%\s*\(\s*CLANG_REVISION\s*,\s*CLANG_SUB_REVISION\s*,?\s*\)"#
    )
    .unwrap();
    static ref CLANG_REVISION_RE: Regex =
        Regex::new(r#"(?m)^CLANG_REVISION\s*=\s*(?:'([^']*)'|"([^"]*)")"#).unwrap();
    static ref CLANG_SUB_REVISION_RE: Regex =
        Regex::new(r#"(?m)^CLANG_SUB_REVISION\s*=\s*(?:'([^']*)'|"([^"]*)"|(\d+))"#).unwrap();
}

fn first_group(caps: &Captures<'_>) -> Option<String> {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().trim().to_string())
}

fn assigned(re: &Regex, source: &str) -> Option<String> {
    re.captures(source).as_ref().and_then(first_group)
}

/// Extracts the clang package version from the contents of `update.py`.
///
/// Returns `None` when no usable, non-empty version can be found.
pub fn parse_package_version(source: &str) -> Option<String> {
    let version = if let Some(literal) = assigned(&PACKAGE_VERSION_LITERAL_RE, source) {
        literal
    } else if PACKAGE_VERSION_COMPOSED_RE.is_match(source) {
        let revision = assigned(&CLANG_REVISION_RE, source)?;
        let sub_revision = assigned(&CLANG_SUB_REVISION_RE, source)?;
        if revision.is_empty() || sub_revision.is_empty() {
            return None;
        }
        format!("{revision}-{sub_revision}")
    } else {
        return None;
    };

    if version.is_empty() {
        None
    } else {
        Some(version)
    }
}

/// Reads the clang package version from the toolchain update helper.
///
/// Every failure here is recoverable: it is logged and reported as `None`.
pub fn clang_revision(config: &Config) -> Option<String> {
    let script = config.clang_update_script();
    debug!("Reading clang package version from {}", script.display());

    let source = match fs::read_to_string(&script) {
        Ok(source) => source,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Clang update helper not found at {}", script.display());
            return None;
        }
        Err(e) => {
            warn!("Could not read clang update helper {}: {}", script.display(), e);
            return None;
        }
    };

    let version = parse_package_version(&source);
    match &version {
        Some(v) => debug!("Detected clang package version {v}"),
        None => debug!("No PACKAGE_VERSION found in {}", script.display()),
    }
    version
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    const UPSTREAM_LAYOUT: &str = r#"
# Do NOT CHANGE this if you don't know what you're doing -- see
# https://chromium.googlesource.com/chromium/src/+/main/docs/updating_clang.md
# Reverting problematic clang rolls is safe, though.
# This is the output of `git describe` and is usable as a commit-ish.
CLANG_REVISION = 'llvmorg-18-init-4631-gd50b56d1'
CLANG_SUB_REVISION = 1

PACKAGE_VERSION = '%s-%s' % (CLANG_REVISION, CLANG_SUB_REVISION)
RELEASE_VERSION = '18'
"#;

    #[test]
    fn composes_revision_and_sub_revision() {
        assert_eq!(
            parse_package_version(UPSTREAM_LAYOUT),
            Some("llvmorg-18-init-4631-gd50b56d1-1".to_string())
        );
    }

    #[test]
    fn accepts_double_quoted_composition() {
        let source = "CLANG_REVISION = \"abc\"\nCLANG_SUB_REVISION = \"7\"\nPACKAGE_VERSION = \"%s-%s\" % (CLANG_REVISION, CLANG_SUB_REVISION)\n";
        assert_eq!(parse_package_version(source), Some("abc-7".to_string()));
    }

    #[test]
    fn literal_version_wins() {
        let source = "CLANG_REVISION = 'ignored'\nCLANG_SUB_REVISION = 2\nPACKAGE_VERSION = 'n123-4'  # pinned\n";
        assert_eq!(parse_package_version(source), Some("n123-4".to_string()));
    }

    #[test]
    fn empty_version_is_none() {
        assert_eq!(parse_package_version("PACKAGE_VERSION = ''\n"), None);
        assert_eq!(
            parse_package_version(
                "CLANG_REVISION = ''\nCLANG_SUB_REVISION = 1\nPACKAGE_VERSION = '%s-%s' % (CLANG_REVISION, CLANG_SUB_REVISION)\n"
            ),
            None
        );
    }

    #[test]
    fn missing_constant_is_none() {
        assert_eq!(parse_package_version("RELEASE_VERSION = '18'\n"), None);
        assert_eq!(
            parse_package_version("PACKAGE_VERSION = '%s-%s' % (CLANG_REVISION, CLANG_SUB_REVISION)\n"),
            None
        );
    }

    #[test]
    fn indented_assignments_are_ignored() {
        assert_eq!(parse_package_version("def f():\n  PACKAGE_VERSION = 'x'\n"), None);
    }

    fn config_at(root: PathBuf) -> Config {
        Config::from_parts(root, None, "git".into(), "cipd".into())
    }

    #[test]
    fn missing_helper_is_recoverable() {
        let dir = TempDir::new().unwrap();
        assert_eq!(clang_revision(&config_at(dir.path().to_path_buf())), None);
    }

    #[test]
    fn reads_helper_from_source_root() {
        let dir = TempDir::new().unwrap();
        let config = config_at(dir.path().to_path_buf());
        let script = config.clang_update_script();
        fs::create_dir_all(script.parent().unwrap()).unwrap();
        fs::write(&script, UPSTREAM_LAYOUT).unwrap();
        assert_eq!(
            clang_revision(&config),
            Some("llvmorg-18-init-4631-gd50b56d1-1".to_string())
        );
    }
}
