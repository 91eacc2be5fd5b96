//! # CLI Module
//!
//! Command-line tooling for route files.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the route table a file produces, in registration order:
//!
//! ```bash
//! routemount routes --routes config/routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Dry-run a request. Handler references resolve to stubs that print their name and
//! parameters, so the output shows exactly which before-middleware and route ran:
//!
//! ```bash
//! routemount resolve --routes config/routes.yaml --method POST --path /admin/2/edit \
//!     -H "X-HTTP-Method-Override: DELETE" --format json
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands, OutputFormat};
