use crate::document::DocumentBuilder;
use sbreport_types::{Package, SourceRef};
use tracing::debug;

/// Render one resolved package.
///
/// Metadata fields appear only when present, in a fixed order. The source
/// and patch lists are always announced, even when empty, and are numbered
/// from 1 independently in resolver order. Directive blocks are passed
/// through line for line.
pub fn render_package(doc: &mut dyn DocumentBuilder, package: &Package) {
    debug!(
        package = %package.name,
        config = %package.config_file,
        sources = package.sources.len(),
        patches = package.patches.len(),
        "render package"
    );

    doc.package_open(&package.name, &package.config_file);

    let info = &package.info;
    let fields = [
        ("Summary", info.summary.as_deref(), true),
        ("URL", info.url.as_deref(), false),
        ("Version", info.version.as_deref(), false),
        ("Release", info.release.as_deref(), false),
        ("Build Arch", info.buildarch.as_deref(), false),
    ];
    for (label, value, separated) in fields {
        if let Some(value) = value {
            doc.field(label, value, separated);
        }
    }

    render_list(doc, "Sources", &package.sources);
    render_list(doc, "Patches", &package.patches);

    let d = &package.directives;
    for (label, block) in [
        ("Preparation", &d.prep),
        ("Build", &d.build),
        ("Install", &d.install),
        ("Clean", &d.clean),
    ] {
        if let Some(lines) = block {
            doc.directive(label, lines);
        }
    }

    doc.package_close(&package.name);
}

fn render_list(doc: &mut dyn DocumentBuilder, label: &str, entries: &[SourceRef]) {
    doc.list_open(label, entries.len());
    for (i, entry) in entries.iter().enumerate() {
        doc.list_item(i + 1, &entry.locator);
    }
}
