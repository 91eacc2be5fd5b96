//! # routemount
//!
//! **routemount** is a regex-driven request router: given a method and a path it decides
//! which before-middleware and which route handler run, with which positional parameters,
//! and falls back to a not-found handler when nothing matches.
//!
//! ## Overview
//!
//! The crate is the pattern-matching and dispatch core only. A transport (an HTTP server
//! or anything else) supplies the method, URI and headers; handlers are application code.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`pattern`]** - Route pattern compilation and offset-based parameter extraction
//! - **[`router`]** - Route and before-middleware tables per method, mount scopes
//! - **[`dispatcher`]** - Effective method resolution, before/main phases, not-found fallback
//! - **[`handler`]** - Direct and deferred (`owner@member`) handler references
//! - **[`route_file`]** - Declarative route registration from YAML, TOML or JSON
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`runtime_config`]** - Environment-derived defaults
//! - **[`cli`]** - `routemount` command-line tool
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Dispatcher
//!     participant Router
//!     participant Pattern as RoutePattern
//!     participant Handler
//!
//!     Transport->>Dispatcher: dispatch(Request, on_complete)
//!     Dispatcher->>Dispatcher: effective method<br/>(HEAD→GET, POST override)
//!     Dispatcher->>Dispatcher: current path<br/>(strip base path + query)
//!
//!     loop every before entry for method
//!         Dispatcher->>Pattern: match_path(path)
//!         alt matched
//!             Dispatcher->>Handler: invoke(params)
//!         end
//!     end
//!
//!     Dispatcher->>Router: resolve(method, path)
//!     Router->>Pattern: match_path in registration order
//!     alt first match
//!         Dispatcher->>Handler: invoke(params)
//!         Dispatcher->>Handler: on_complete
//!     else no match
//!         Dispatcher->>Handler: not_found (if set)
//!         Dispatcher-->>Transport: NotFound (otherwise)
//!     end
//!     Dispatcher-->>Transport: DispatchOutcome
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routemount::dispatcher::{Dispatcher, Request};
//! use routemount::handler::{ControllerRegistry, HandlerRef};
//! use routemount::router::Router;
//! use http::Method;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut controllers = ControllerRegistry::new();
//! controllers.register("sample", "admin", |_, out| {
//!     out.write_str("You are accessing admin module! ");
//!     Ok(())
//! });
//!
//! let mut router = Router::new();
//! router.get("/hello", HandlerRef::direct(|_, out| {
//!     out.write_str("hello world!!");
//!     Ok(())
//! }))?;
//! router.get("/admin/1", "sample@admin")?;
//! router.set_not_found(HandlerRef::direct(|_, out| {
//!     out.write_str("Not found! ");
//!     Ok(())
//! }))?;
//!
//! let dispatcher = Dispatcher::new(Arc::new(router)).with_resolver(Arc::new(controllers));
//! let outcome = dispatcher.dispatch(&Request::new(Method::GET, "/admin/1"), None)?;
//! assert_eq!(outcome.body, b"You are accessing admin module! ");
//! # Ok(())
//! # }
//! ```
//!
//! ## Runtime Considerations
//!
//! Dispatch is synchronous and single-threaded per call. Registration happens before
//! dispatch begins; afterwards the router is read-only, so one `Arc<Router>` can be
//! shared by any number of worker threads without locking.

pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod logging;
pub mod pattern;
pub mod route_file;
pub mod router;
pub mod runtime_config;

pub use dispatcher::{DispatchOutcome, DispatchStatus, Dispatcher, Request};
pub use error::RouterError;
pub use handler::{ControllerRegistry, HandlerRef, HandlerResolver, ResponseBody};
pub use pattern::{Params, RoutePattern};
pub use route_file::RouteFile;
pub use router::{RouteScope, Router};
