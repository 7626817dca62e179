//! Depth-first, pre-order expansion of a build-set tree.

use crate::error::WalkError;
use crate::ports::MetadataResolver;
use sbreport_render::{DocumentBuilder, render_package};
use sbreport_types::{Macros, MemberKind};
use tracing::debug;

/// Counters gathered over one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub build_sets: usize,
    pub packages: usize,
    pub max_depth: usize,
}

/// Expands build-sets through a [`MetadataResolver`] into a document.
///
/// Nothing is cached: a build-set or package that appears twice is resolved
/// and rendered twice. A build-set that is already being expanded further up
/// the current path is a cycle and fails the walk.
pub struct BuildSetWalker<'a> {
    resolver: &'a dyn MetadataResolver,
}

impl<'a> BuildSetWalker<'a> {
    pub fn new(resolver: &'a dyn MetadataResolver) -> Self {
        Self { resolver }
    }

    /// Expand `root` at depth 1.
    pub fn walk(
        &self,
        root: &str,
        macros: &Macros,
        doc: &mut dyn DocumentBuilder,
    ) -> Result<WalkStats, WalkError> {
        let mut path = Vec::new();
        let mut stats = WalkStats::default();
        self.expand(root, macros, 1, &mut path, doc, &mut stats)?;
        Ok(stats)
    }

    fn expand(
        &self,
        name: &str,
        macros: &Macros,
        depth: usize,
        path: &mut Vec<String>,
        doc: &mut dyn DocumentBuilder,
        stats: &mut WalkStats,
    ) -> Result<(), WalkError> {
        let set = self
            .resolver
            .resolve_members(name, macros)
            .map_err(|source| WalkError::Resolve {
                name: name.to_string(),
                source,
            })?;

        if path.contains(&set.id) {
            let mut chain = path.clone();
            chain.push(set.id);
            return Err(WalkError::Cycle {
                chain: chain.join(" -> "),
            });
        }

        debug!(build_set = name, depth, members = set.members.len(), "expand build-set");
        path.push(set.id.clone());
        stats.build_sets += 1;
        stats.max_depth = stats.max_depth.max(depth);
        doc.build_set_open(name, depth);

        for member in &set.members {
            match MemberKind::classify(member) {
                Some(MemberKind::BuildSet) => {
                    self.expand(member, &set.macros, depth + 1, path, doc, stats)?;
                }
                Some(MemberKind::Config) => {
                    let package = self
                        .resolver
                        .resolve_package(member, &set.macros)
                        .map_err(|source| WalkError::Resolve {
                            name: member.clone(),
                            source,
                        })?;
                    render_package(doc, &package);
                    stats.packages += 1;
                }
                None => {
                    return Err(WalkError::InvalidConfigType {
                        locator: member.clone(),
                    });
                }
            }
        }

        doc.build_set_close(name, depth);
        path.pop();
        Ok(())
    }
}
