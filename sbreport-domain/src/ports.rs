use anyhow::Context;
use sbreport_types::{Macros, Package};
use std::collections::HashMap;

/// A build-set's members as resolved under a macro context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBuildSet {
    /// Stable identity used for cycle detection, e.g. the resolved file path.
    pub id: String,
    /// Member locators in declared order.
    pub members: Vec<String>,
    /// Context to resolve the members under.
    pub macros: Macros,
}

/// Turns build-set and package names into members and metadata.
///
/// The walker calls this on every visit; implementations must not assume
/// results are cached. A package config name passed to `resolve_members`
/// resolves to a set whose only member is that config.
pub trait MetadataResolver {
    fn resolve_members(&self, name: &str, macros: &Macros) -> anyhow::Result<ResolvedBuildSet>;

    fn resolve_package(&self, name: &str, macros: &Macros) -> anyhow::Result<Package>;
}

/// Map-backed resolver for embedding and testing.
///
/// Build-sets pass the incoming macro context through unchanged.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    build_sets: HashMap<String, Vec<String>>,
    packages: HashMap<String, Package>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_build_set<I, S>(mut self, name: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_sets
            .insert(name.to_string(), members.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_package(mut self, name: &str, package: Package) -> Self {
        self.packages.insert(name.to_string(), package);
        self
    }
}

impl MetadataResolver for InMemoryResolver {
    fn resolve_members(&self, name: &str, macros: &Macros) -> anyhow::Result<ResolvedBuildSet> {
        if self.packages.contains_key(name) {
            return Ok(ResolvedBuildSet {
                id: name.to_string(),
                members: vec![name.to_string()],
                macros: macros.clone(),
            });
        }
        let members = self
            .build_sets
            .get(name)
            .with_context(|| format!("config file not found: {name}"))?;
        Ok(ResolvedBuildSet {
            id: name.to_string(),
            members: members.clone(),
            macros: macros.clone(),
        })
    }

    fn resolve_package(&self, name: &str, _macros: &Macros) -> anyhow::Result<Package> {
        self.packages
            .get(name)
            .cloned()
            .with_context(|| format!("config file not found: {name}"))
    }
}
