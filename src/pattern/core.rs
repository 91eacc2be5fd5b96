//! Pattern core module - hot path for path matching.
//!
//! Matching runs once per candidate route on every request, so parameter storage is
//! stack-allocated for the common case and parameter names are shared `Arc<str>`s
//! resolved once at compile time.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]

use crate::error::RouterError;
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Maximum number of positional parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// `None` marks a group that did not participate in the match (e.g. the losing side
/// of an alternation); `Some("")` marks a group that matched empty.
pub type ParamVec = SmallVec<[Option<String>; MAX_INLINE_PARAMS]>;

type NameVec = SmallVec<[Option<Arc<str>>; MAX_INLINE_PARAMS]>;

/// Whole-segment placeholder such as `{id}` or `{user_id}`
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\{([A-Za-z_][A-Za-z0-9_]*)\}$").expect("placeholder regex is valid")
});

/// Positional parameters extracted from a matched path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: ParamVec,
    names: NameVec,
}

impl Params {
    /// Get the parameter at `index` (declaration order of capture groups)
    ///
    /// Returns `None` both for an out-of-range index and for a group that did not
    /// participate in the match. Use [`Params::is_present`] to tell them apart.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    /// Whether the group at `index` participated in the match
    #[inline]
    #[must_use]
    pub fn is_present(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Some(_)))
    }

    /// Get a parameter by placeholder or named-group name
    ///
    /// Uses "last write wins" semantics if the same name appears twice.
    #[must_use]
    pub fn get_named(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .zip(self.values.iter())
            .rfind(|(n, _)| n.as_deref() == Some(name))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Number of capture groups in the pattern
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw parameter slots, in capture-group order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.values.iter().map(|v| v.as_deref())
    }
}

/// Normalize a pattern against the current mount prefix
///
/// The pattern is trimmed of `/` on both ends and joined to `base` with a single `/`.
/// When `base` is non-empty, trailing slashes are stripped, so mounting `/` under `/v1`
/// yields `/v1`. At the root, `/` stays `/`.
#[must_use]
pub fn normalize(base: &str, pattern: &str) -> String {
    let trimmed = pattern.trim_matches('/');
    let mut full = String::with_capacity(base.len() + trimmed.len() + 1);
    full.push_str(base);
    full.push('/');
    full.push_str(trimmed);

    if base.is_empty() {
        full
    } else {
        let keep = full.trim_end_matches('/').len();
        full.truncate(keep);
        full
    }
}

/// A compiled, anchored route pattern
#[derive(Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
    names: Arc<[Option<Arc<str>>]>,
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePattern")
            .field("source", &self.source)
            .field("groups", &self.names.len())
            .finish()
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for RoutePattern {}

impl RoutePattern {
    /// Compile an already-normalized pattern
    ///
    /// `{name}` segments are translated to `(?P<name>[^/]+)`; everything else is passed
    /// to the regex engine as written. The result is anchored as `^(?:...)$` so that
    /// a top-level alternation still has to cover the whole path.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MalformedPattern`] if the translated pattern is not a
    /// valid regex (unbalanced groups, duplicate placeholder names, ...).
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        let translated = translate_placeholders(pattern);
        let malformed = |e: regex::Error| RouterError::MalformedPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        };

        // Validate unwrapped: a stray `)` could otherwise close the anchoring group
        Regex::new(&translated).map_err(malformed)?;

        let mut anchored = String::with_capacity(translated.len() + 6);
        anchored.push_str("^(?:");
        anchored.push_str(&translated);
        anchored.push_str(")$");

        let regex = Regex::new(&anchored).map_err(malformed)?;

        let names: Arc<[Option<Arc<str>>]> = regex
            .capture_names()
            .skip(1)
            .map(|n| n.map(Arc::from))
            .collect();

        debug!(
            pattern = %pattern,
            regex = %anchored,
            groups = names.len(),
            "Compiled route pattern"
        );

        Ok(Self {
            source: pattern.to_string(),
            regex,
            names,
        })
    }

    /// The normalized pattern as registered
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of capture groups (= parameters produced on match)
    #[inline]
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.names.len()
    }

    /// Match `path` against this pattern, extracting parameters
    ///
    /// Returns `None` when the pattern does not account for the whole path.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;

        let mut values = ParamVec::new();
        for index in 1..caps.len() {
            let value = caps.get(index).map(|m| {
                // Cut the group where the next group begins so nested groups split
                let end = match caps.get(index + 1) {
                    Some(next) => next.start().clamp(m.start(), m.end()),
                    None => m.end(),
                };
                path[m.start()..end].trim_matches('/').to_string()
            });
            values.push(value);
        }

        Some(Params {
            values,
            names: self.names.iter().cloned().collect(),
        })
    }
}

/// Compile `pattern` and match it against `path` in one step
///
/// Convenience for one-off checks; the router compiles each pattern once at
/// registration and reuses it.
///
/// # Errors
///
/// Returns [`RouterError::MalformedPattern`] if `pattern` does not compile.
pub fn match_pattern(pattern: &str, path: &str) -> Result<Option<Params>, RouterError> {
    Ok(RoutePattern::compile(pattern)?.match_path(path))
}

fn translate_placeholders(pattern: &str) -> String {
    if !pattern.contains('{') {
        return pattern.to_string();
    }

    let mut out = String::with_capacity(pattern.len() + 16);
    for (i, segment) in pattern.split('/').enumerate() {
        if i > 0 {
            out.push('/');
        }
        match PLACEHOLDER.captures(segment).and_then(|c| c.get(1)) {
            Some(name) => {
                out.push_str("(?P<");
                out.push_str(name.as_str());
                out.push_str(">[^/]+)");
            }
            None => out.push_str(segment),
        }
    }
    out
}
