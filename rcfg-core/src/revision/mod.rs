// rcfg-core/src/revision/mod.rs
//! Detection of the two revisions that key the reclient cfg packages.

pub mod clang;
pub mod nacl;

pub use clang::{clang_revision, parse_package_version};
pub use nacl::nacl_revision;
