//! # Pattern Module
//!
//! The pattern module compiles route patterns and evaluates them against request paths,
//! extracting positional parameters from capture groups.
//!
//! ## Overview
//!
//! A route pattern is a path template in which any parenthesized subexpression is a
//! regex capturing group. Raw regex and parameter extraction are the same mechanism:
//!
//! - `/hello/world` - literal, matches exactly that path
//! - `/admin/2.*` - unparenthesized wildcard, consumed but not captured
//! - `/(\w+)/(\w+)/.*` - two positional parameters followed by a wildcard
//! - `/users/{id}` - whole-segment placeholder, translated to `(?P<id>[^/]+)`
//!
//! Patterns are anchored at both ends when compiled, so a pattern only matches if it
//! accounts for the entire path.
//!
//! ## Parameter Extraction
//!
//! Capture groups may nest or sit next to each other. The value for each group is taken
//! from its own match *up to the offset where the next group's match starts*, then trimmed
//! of `/`. This splits nested optional groups into their individual segments:
//!
//! ```rust
//! use routemount::pattern::RoutePattern;
//!
//! let pattern = RoutePattern::compile("/blog(/\\d+(/\\d+)?)?").unwrap();
//! let params = pattern.match_path("/blog/12/3").unwrap();
//! assert_eq!(params.get(0), Some("12"));
//! assert_eq!(params.get(1), Some("3"));
//! ```
//!
//! A group that did not participate in the match yields `None`; a group that matched the
//! empty string yields `Some("")`.

mod core;
#[cfg(test)]
mod tests;

pub use core::{match_pattern, normalize, Params, RoutePattern, MAX_INLINE_PARAMS, ParamVec};
