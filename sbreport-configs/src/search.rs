use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use glob::{Pattern, glob};
use sbreport_types::{BSET_SUFFIX, CFG_SUFFIX, MemberKind};
use tracing::debug;

/// Ordered list of directories searched for build-sets and configs.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    dirs: Vec<Utf8PathBuf>,
}

impl ConfigPaths {
    pub fn new(dirs: Vec<Utf8PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &[Utf8PathBuf] {
        &self.dirs
    }

    /// Locate `name`: as a path first, then in each directory in order,
    /// trying the bare name and the name with each suffix.
    pub fn find(&self, name: &str) -> Option<Utf8PathBuf> {
        let direct = Utf8Path::new(name);
        if direct.is_file() {
            debug!(name, path = %direct, "found config");
            return Some(direct.to_path_buf());
        }
        for dir in &self.dirs {
            for candidate in [
                name.to_string(),
                format!("{name}{BSET_SUFFIX}"),
                format!("{name}{CFG_SUFFIX}"),
            ] {
                let path = dir.join(&candidate);
                if path.is_file() {
                    debug!(name, path = %path, "found config");
                    return Some(path);
                }
            }
        }
        debug!(name, "config not found on search path");
        None
    }

    /// Every file of `kind` under the search path, relative to its directory.
    /// Sorted; names present in several directories are listed once.
    pub fn list(&self, kind: MemberKind) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let suffix = match kind {
            MemberKind::BuildSet => BSET_SUFFIX,
            MemberKind::Config => CFG_SUFFIX,
        };
        let mut out = Vec::new();
        for dir in &self.dirs {
            let pattern = format!("{}/**/*{}", Pattern::escape(dir.as_str()), suffix);
            debug!(pattern = %pattern, "scanning config directory");
            for entry in glob(&pattern).with_context(|| format!("glob {pattern}"))? {
                let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
                let path = Utf8PathBuf::from_path_buf(path)
                    .map_err(|p| anyhow::anyhow!("non UTF-8 path: {}", p.display()))?;
                let rel = path.strip_prefix(dir).unwrap_or(&path).to_path_buf();
                out.push(rel);
            }
        }
        out.sort();
        out.dedup();
        Ok(out)
    }
}
