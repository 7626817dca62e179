use crate::bset::parse_build_set;
use crate::cfg::parse_package;
use crate::error::ConfigError;
use crate::search::ConfigPaths;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use sbreport_domain::{MetadataResolver, ResolvedBuildSet};
use sbreport_types::{CFG_SUFFIX, Macros, Package};
use tracing::debug;

/// Resolves names against config files on a [`ConfigPaths`] search path.
///
/// Files are re-read on every call.
#[derive(Debug, Clone)]
pub struct FsMetadataResolver {
    paths: ConfigPaths,
}

impl FsMetadataResolver {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    fn locate(&self, name: &str) -> Result<Utf8PathBuf, ConfigError> {
        self.paths.find(name).ok_or_else(|| ConfigError::NotFound {
            name: name.to_string(),
        })
    }
}

/// Canonical path string, falling back to the path as given.
fn identity(path: &Utf8Path) -> String {
    fs::canonicalize(path)
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| path.to_path_buf())
        .into_string()
}

impl MetadataResolver for FsMetadataResolver {
    fn resolve_members(&self, name: &str, macros: &Macros) -> anyhow::Result<ResolvedBuildSet> {
        let path = self.locate(name)?;
        if path.as_str().ends_with(CFG_SUFFIX) {
            debug!(config = name, path = %path, "package config as a one-member set");
            return Ok(ResolvedBuildSet {
                id: identity(&path),
                members: vec![path.to_string()],
                macros: macros.clone(),
            });
        }
        let contents = fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
        let (members, macros) = parse_build_set(&path, &contents, macros)?;
        debug!(build_set = name, path = %path, members = members.len(), "loaded build-set");
        Ok(ResolvedBuildSet {
            id: identity(&path),
            members,
            macros,
        })
    }

    fn resolve_package(&self, name: &str, macros: &Macros) -> anyhow::Result<Package> {
        let path = self.locate(name)?;
        let contents = fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
        let package = parse_package(&path, &contents, macros)?;
        debug!(config = name, path = %path, package = %package.name, "loaded package config");
        Ok(package)
    }
}
