//! # Router Module
//!
//! The router module stores registered routes and before-middleware per HTTP method and
//! composes route groups under mount prefixes.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Normalizing patterns against the current mount prefix and compiling them
//! - Registering the same pattern and handler under every method in a `GET|POST` list
//! - Keeping entries in registration order (first registered, first tried)
//! - Resolving a method + path to the first matching primary route
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: At startup, patterns are combined with the mount prefix, normalized
//!    (leading `/`, no trailing `/` except the root) and compiled into anchored regexes.
//!    Handler strings such as `sample@admin` are split into owner and member here.
//!
//! 2. **Matching**: For each incoming request, the dispatcher walks the tables for the
//!    effective method. Primary routes stop at the first match; before-middleware
//!    runs every match.
//!
//! ## Mounting
//!
//! ```rust
//! use routemount::router::Router;
//! use http::Method;
//!
//! # fn main() -> Result<(), routemount::RouterError> {
//! let mut router = Router::new();
//! router.mount("/movies", |movies| {
//!     movies.get("/", "movies@index")?;
//!     movies.get("/(\\d+)", "movies@show")?;
//!     movies.mount("/(\\d+)/photos", |photos| photos.get("/", "photos@index"))
//! })?;
//!
//! let (_entry, params) = router.resolve(&Method::GET, "/movies/7/photos").unwrap();
//! assert_eq!(params.get(0), Some("7"));
//! # Ok(())
//! # }
//! ```

mod core;
mod scope;

pub use core::{MethodTable, RouteEntry, Router};
pub use scope::RouteScope;
