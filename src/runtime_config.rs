//! # Runtime Configuration Module
//!
//! Environment-derived defaults for hosting the router.
//!
//! ## Environment Variables
//!
//! ### `ROUTEMOUNT_SCRIPT_NAME`
//!
//! Path of the entry script as seen by the web server (e.g. `/app/index.php`). Its
//! directory is stripped from request URIs before matching, which lets an application
//! live in a subfolder. Unset means the application is mounted at `/`.
//!
//! ### `ROUTEMOUNT_ROUTE_FILE`
//!
//! Default route file for the CLI (YAML, TOML or JSON).
//!
//! ## Usage
//!
//! ```rust
//! use routemount::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Script name: {:?}", config.script_name);
//! ```

use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Entry script path used to compute the request base path
    pub script_name: Option<String>,
    /// Route file loaded by the CLI when none is passed explicitly
    pub route_file: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        RuntimeConfig {
            script_name: non_empty("ROUTEMOUNT_SCRIPT_NAME"),
            route_file: non_empty("ROUTEMOUNT_ROUTE_FILE").map(PathBuf::from),
        }
    }
}
