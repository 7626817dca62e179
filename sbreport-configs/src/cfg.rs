use crate::bset::split_define;
use crate::error::ConfigError;
use camino::Utf8Path;
use sbreport_types::{Macros, Package, SourceRef};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Prep,
    Build,
    Install,
    Clean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Description,
    Directive(Stage),
}

fn section_keyword(word: &str) -> Option<Section> {
    match word {
        "%prep" => Some(Section::Directive(Stage::Prep)),
        "%build" => Some(Section::Directive(Stage::Build)),
        "%install" => Some(Section::Directive(Stage::Install)),
        "%clean" => Some(Section::Directive(Stage::Clean)),
        "%description" => Some(Section::Description),
        _ => None,
    }
}

/// Parse a package config.
///
/// The preamble holds `Tag: value` lines. `%prep`, `%build`, `%install` and
/// `%clean` open directive blocks whose lines are kept as written after
/// macro expansion. A missing `Name:` falls back to the file stem.
pub fn parse_package(
    path: &Utf8Path,
    contents: &str,
    macros: &Macros,
) -> Result<Package, ConfigError> {
    let mut ctx = macros.clone();
    let mut package = Package::new("", path.as_str());
    let mut section = Section::Preamble;

    for (idx, raw) in contents.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw.trim();

        if let Some(rest) = line.strip_prefix("%define")
            && let Some((name, value)) = split_define(rest)
        {
            let value = ctx
                .expand(value)
                .map_err(|e| ConfigError::parse(path, lineno, e.to_string()))?;
            ctx.define(name, value);
            continue;
        }

        let first_word = line.split_whitespace().next().unwrap_or("");
        if let Some(next) = section_keyword(first_word) {
            if let Section::Directive(stage) = next {
                let block = stage_block(&mut package, stage);
                if block.is_some() {
                    return Err(ConfigError::parse(
                        path,
                        lineno,
                        format!("duplicate {first_word} section"),
                    ));
                }
                *block = Some(Vec::new());
            }
            section = next;
            continue;
        }

        match section {
            Section::Description => {}
            Section::Directive(stage) => {
                let line = ctx
                    .expand(raw.trim_end())
                    .map_err(|e| ConfigError::parse(path, lineno, e.to_string()))?;
                if let Some(lines) = stage_block(&mut package, stage) {
                    lines.push(line);
                }
            }
            Section::Preamble => {
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if line.starts_with('%') && !line.starts_with("%{") {
                    return Err(ConfigError::parse(
                        path,
                        lineno,
                        format!("unsupported directive: {line}"),
                    ));
                }
                let Some((tag, value)) = line.split_once(':') else {
                    return Err(ConfigError::parse(
                        path,
                        lineno,
                        format!("expected `Tag: value`, found: {line}"),
                    ));
                };
                let tag = tag.trim().to_ascii_lowercase();
                let value = ctx
                    .expand(value.trim())
                    .map_err(|e| ConfigError::parse(path, lineno, e.to_string()))?;
                apply_tag(&mut package, &mut ctx, &tag, value);
            }
        }
    }

    for stage in [Stage::Prep, Stage::Build, Stage::Install, Stage::Clean] {
        if let Some(lines) = stage_block(&mut package, stage) {
            while lines.last().is_some_and(|l| l.trim().is_empty()) {
                lines.pop();
            }
        }
    }

    if package.name.is_empty() {
        package.name = path.file_stem().unwrap_or(path.as_str()).to_string();
    }
    Ok(package)
}

fn stage_block(package: &mut Package, stage: Stage) -> &mut Option<Vec<String>> {
    let d = &mut package.directives;
    match stage {
        Stage::Prep => &mut d.prep,
        Stage::Build => &mut d.build,
        Stage::Install => &mut d.install,
        Stage::Clean => &mut d.clean,
    }
}

fn apply_tag(package: &mut Package, ctx: &mut Macros, tag: &str, value: String) {
    match tag {
        "name" => {
            ctx.define("name", value.as_str());
            package.name = value;
        }
        "summary" => package.info.summary = Some(value),
        "url" => package.info.url = Some(value),
        "version" => {
            ctx.define("version", value.as_str());
            package.info.version = Some(value);
        }
        "release" => {
            ctx.define("release", value.as_str());
            package.info.release = Some(value);
        }
        "buildarch" => package.info.buildarch = Some(value),
        t if is_numbered(t, "source") => package.sources.push(SourceRef::new(t, value)),
        t if is_numbered(t, "patch") => package.patches.push(SourceRef::new(t, value)),
        other => debug!(tag = other, "ignoring tag"),
    }
}

fn is_numbered(tag: &str, prefix: &str) -> bool {
    tag.strip_prefix(prefix)
        .is_some_and(|n| n.chars().all(|c| c.is_ascii_digit()))
}
