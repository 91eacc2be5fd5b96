//! # Route File Module
//!
//! Declarative route registration. A route file lists before-middleware, routes, nested
//! mounts and the not-found / completion handlers; loading it feeds the exact same
//! [`Router`] registration calls a program would make, so the dispatcher cannot tell
//! the two apart.
//!
//! ## Format
//!
//! YAML (`.yaml` / `.yml`), TOML (`.toml`) and JSON (`.json`) are accepted, chosen by
//! file extension:
//!
//! ```yaml
//! not_found: sample@notfound
//! on_complete: sample@success
//! before:
//!   - { methods: "GET|POST", pattern: "/admin/2.*", handler: "sample@auth" }
//! routes:
//!   - { methods: GET, pattern: /hello, handler: sample@hello }
//!   - { methods: GET, pattern: /admin/1, handler: sample@admin }
//! mounts:
//!   - prefix: /v1
//!     routes:
//!       - { methods: GET, pattern: /users, handler: users@index }
//! ```
//!
//! Handlers are always `owner@member` references, resolved at dispatch time through a
//! [`HandlerResolver`](crate::handler::HandlerResolver).
//!
//! Within one level, `before` entries register first, then `routes`, then nested
//! `mounts`; since the first matching route wins, that order is significant.

use crate::error::RouterError;
use crate::handler::HandlerRef;
use crate::router::{RouteScope, Router};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const INLINE_SOURCE: &str = "<inline>";

/// One route or before-middleware entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSpec {
    /// `|`-delimited method list, e.g. `GET|POST`
    pub methods: String,
    pub pattern: String,
    /// `owner@member` reference
    pub handler: String,
}

/// A group of entries registered under a shared prefix
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MountSpec {
    pub prefix: String,
    #[serde(default)]
    pub before: Vec<RouteSpec>,
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
    #[serde(default)]
    pub mounts: Vec<MountSpec>,
}

/// Parsed route file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteFile {
    #[serde(default)]
    pub not_found: Option<String>,
    /// Handler to pass as the dispatcher's completion callback
    #[serde(default)]
    pub on_complete: Option<String>,
    #[serde(default)]
    pub before: Vec<RouteSpec>,
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
    #[serde(default)]
    pub mounts: Vec<MountSpec>,
}

impl RouteFile {
    /// Read and parse a route file, picking the format from its extension
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::RouteFile`] if the file cannot be read, has an
    /// unsupported extension, or does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RouterError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| RouterError::RouteFile {
            path: shown.clone(),
            reason: e.to_string(),
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let file = match extension.as_deref() {
            Some("yaml") | Some("yml") => parse_yaml(&content, &shown)?,
            Some("toml") => parse_toml(&content, &shown)?,
            Some("json") => parse_json(&content, &shown)?,
            _ => {
                return Err(RouterError::RouteFile {
                    path: shown,
                    reason: "unsupported extension (expected .yaml, .yml, .toml or .json)"
                        .to_string(),
                })
            }
        };

        info!(
            path = %shown,
            routes = file.route_count(),
            befores = file.before_count(),
            mounts = file.mounts.len(),
            "Loaded route file"
        );
        Ok(file)
    }

    /// # Errors
    ///
    /// Returns [`RouterError::RouteFile`] on invalid YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self, RouterError> {
        parse_yaml(content, INLINE_SOURCE)
    }

    /// # Errors
    ///
    /// Returns [`RouterError::RouteFile`] on invalid TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, RouterError> {
        parse_toml(content, INLINE_SOURCE)
    }

    /// # Errors
    ///
    /// Returns [`RouterError::RouteFile`] on invalid JSON.
    pub fn from_json_str(content: &str) -> Result<Self, RouterError> {
        parse_json(content, INLINE_SOURCE)
    }

    /// Total primary routes, including nested mounts (before method expansion)
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len() + self.mounts.iter().map(MountSpec::route_count).sum::<usize>()
    }

    /// Total before entries, including nested mounts (before method expansion)
    #[must_use]
    pub fn before_count(&self) -> usize {
        self.before.len() + self.mounts.iter().map(MountSpec::before_count).sum::<usize>()
    }

    /// Register everything in this file on `router`
    ///
    /// Returns the parsed completion callback, if the file declares one.
    ///
    /// # Errors
    ///
    /// Propagates the first registration error.
    pub fn apply(&self, router: &mut Router) -> Result<Option<HandlerRef>, RouterError> {
        {
            let mut root = router.scope();
            register_level(&mut root, &self.before, &self.routes, &self.mounts)?;
        }

        if let Some(handler) = &self.not_found {
            router.set_not_found(handler.as_str())?;
        }

        self.on_complete
            .as_deref()
            .map(HandlerRef::parse)
            .transpose()
    }

    /// Build a fresh router from this file
    ///
    /// # Errors
    ///
    /// Propagates the first registration error.
    pub fn build_router(&self) -> Result<(Router, Option<HandlerRef>), RouterError> {
        let mut router = Router::new();
        let on_complete = self.apply(&mut router)?;
        Ok((router, on_complete))
    }
}

impl MountSpec {
    fn route_count(&self) -> usize {
        self.routes.len() + self.mounts.iter().map(MountSpec::route_count).sum::<usize>()
    }

    fn before_count(&self) -> usize {
        self.before.len() + self.mounts.iter().map(MountSpec::before_count).sum::<usize>()
    }
}

fn register_level(
    scope: &mut RouteScope<'_>,
    before: &[RouteSpec],
    routes: &[RouteSpec],
    mounts: &[MountSpec],
) -> Result<(), RouterError> {
    for spec in before {
        scope.before(&spec.methods, &spec.pattern, spec.handler.as_str())?;
    }
    for spec in routes {
        scope.add(&spec.methods, &spec.pattern, spec.handler.as_str())?;
    }
    for mount in mounts {
        scope.mount(&mount.prefix, |child| {
            register_level(child, &mount.before, &mount.routes, &mount.mounts)
        })?;
    }
    Ok(())
}

fn parse_yaml(content: &str, source: &str) -> Result<RouteFile, RouterError> {
    serde_yaml::from_str(content).map_err(|e| RouterError::RouteFile {
        path: source.to_string(),
        reason: e.to_string(),
    })
}

fn parse_toml(content: &str, source: &str) -> Result<RouteFile, RouterError> {
    toml::from_str(content).map_err(|e| RouterError::RouteFile {
        path: source.to_string(),
        reason: e.to_string(),
    })
}

fn parse_json(content: &str, source: &str) -> Result<RouteFile, RouterError> {
    serde_json::from_str(content).map_err(|e| RouterError::RouteFile {
        path: source.to_string(),
        reason: e.to_string(),
    })
}
