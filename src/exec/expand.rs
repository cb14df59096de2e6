// src/exec/expand.rs

//! Environment-variable expansion of the command template.
//!
//! Recognised forms:
//! - `${NAME}` with NAME = `[A-Za-z0-9_]+`
//! - `$N` for a single digit (`$1x` is `$1` followed by `x`)
//! - `$NAME` with NAME = `[A-Za-z_][A-Za-z0-9_]*`
//!
//! Any other `$` is left for the shell, so `$(date)`, `$?` or `$$` pass
//! through untouched. Unset variables expand to the empty string.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VAR_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z0-9_]+)\}|([0-9])|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("valid variable regex")
});

/// Expand against the current process environment.
///
/// Called on every invocation; the result is never cached.
pub fn expand_env(template: &str) -> String {
    expand_with(template, |name| std::env::var(name).ok())
}

/// Expand using a custom lookup.
pub fn expand_with<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let expanded: Cow<'_, str> = VAR_REF.replace_all(template, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        lookup(name).unwrap_or_default()
    });
    expanded.into_owned()
}
