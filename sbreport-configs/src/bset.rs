use crate::error::ConfigError;
use camino::Utf8Path;
use sbreport_types::Macros;

/// Parse a build-set file.
///
/// Returns the member locators in declared order and the macro context the
/// members resolve under (`macros` plus the file's own `%define`s).
pub fn parse_build_set(
    path: &Utf8Path,
    contents: &str,
    macros: &Macros,
) -> Result<(Vec<String>, Macros), ConfigError> {
    let mut ctx = macros.clone();
    let mut members = Vec::new();

    for (idx, raw) in contents.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("%define") {
            let (name, value) = split_define(rest)
                .ok_or_else(|| ConfigError::parse(path, lineno, "%define needs a name"))?;
            let value = ctx
                .expand(value)
                .map_err(|e| ConfigError::parse(path, lineno, e.to_string()))?;
            ctx.define(name, value);
            continue;
        }
        if line.starts_with('%') && !line.starts_with("%{") {
            return Err(ConfigError::parse(
                path,
                lineno,
                format!("unsupported directive: {line}"),
            ));
        }
        let member = ctx
            .expand(line)
            .map_err(|e| ConfigError::parse(path, lineno, e.to_string()))?;
        members.push(member);
    }

    Ok((members, ctx))
}

/// Split the remainder of a `%define` line into name and value.
pub(crate) fn split_define(rest: &str) -> Option<(&str, &str)> {
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((n, v)) => (n, v.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        None
    } else {
        Some((name, value))
    }
}
