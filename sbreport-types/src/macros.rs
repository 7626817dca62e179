//! Opaque macro context threaded through name resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound on the size of one expanded text.
pub const MAX_EXPANDED_LEN: usize = 1 << 20;

/// Expansion produced more text than [`MAX_EXPANDED_LEN`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("macro expansion exceeds {limit} bytes")]
pub struct ExpansionTooLong {
    pub limit: usize,
}

/// Named configuration values under which build-set and package names are expanded.
///
/// References take the form `%{name}`. Unknown references are left verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Macros {
    values: BTreeMap<String, String>,
}

impl Macros {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return a copy with `other`'s definitions layered on top.
    pub fn overlay(&self, other: &Macros) -> Macros {
        let mut merged = self.clone();
        for (k, v) in other.iter() {
            merged.define(k, v);
        }
        merged
    }

    /// Expand every `%{name}` reference, recursively.
    ///
    /// A reference to a macro that is already being expanded is kept
    /// verbatim, so self-referencing definitions terminate.
    pub fn expand(&self, text: &str) -> Result<String, ExpansionTooLong> {
        let mut out = String::with_capacity(text.len());
        let mut active = Vec::new();
        self.expand_into(text, &mut active, &mut out)?;
        Ok(out)
    }

    fn expand_into<'a>(
        &'a self,
        text: &str,
        active: &mut Vec<&'a str>,
        out: &mut String,
    ) -> Result<(), ExpansionTooLong> {
        let mut rest = text;
        while let Some(start) = rest.find("%{") {
            push_checked(out, &rest[..start])?;
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                push_checked(out, &rest[start..])?;
                return Ok(());
            };
            let name = &after[..end];
            match self.values.get_key_value(name) {
                Some((key, value)) if !active.contains(&key.as_str()) => {
                    active.push(key.as_str());
                    self.expand_into(value, active, out)?;
                    active.pop();
                }
                _ => {
                    push_checked(out, "%{")?;
                    push_checked(out, name)?;
                    push_checked(out, "}")?;
                }
            }
            rest = &after[end + 1..];
        }
        push_checked(out, rest)
    }
}

fn push_checked(out: &mut String, s: &str) -> Result<(), ExpansionTooLong> {
    if out.len() + s.len() > MAX_EXPANDED_LEN {
        return Err(ExpansionTooLong {
            limit: MAX_EXPANDED_LEN,
        });
    }
    out.push_str(s);
    Ok(())
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Macros {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Macros::new();
        for (k, v) in iter {
            m.define(k, v);
        }
        m
    }
}
