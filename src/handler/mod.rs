//! # Handler Module
//!
//! Handler references, the capability used to resolve deferred references, and the
//! output sink handlers write into.
//!
//! ## Handler References
//!
//! A route's handler is either invoked directly or looked up by name at dispatch time:
//!
//! - [`HandlerRef::Direct`] wraps a closure `Fn(&Params, &mut ResponseBody) -> anyhow::Result<()>`
//! - [`HandlerRef::Deferred`] holds an `owner@member` pair, split once at registration
//!
//! Deferred references are resolved through a [`HandlerResolver`] supplied by the host
//! application. [`ControllerRegistry`] is the stock resolver: a table of named actions
//! grouped by controller.
//!
//! ```rust
//! use routemount::handler::{ControllerRegistry, HandlerRef};
//!
//! let mut controllers = ControllerRegistry::new();
//! controllers.register("sample", "hello", |_params, out| {
//!     out.write_str("Hello! ");
//!     Ok(())
//! });
//!
//! let deferred = HandlerRef::parse("sample@hello").unwrap();
//! assert_eq!(deferred.describe(), "sample@hello");
//! ```

mod body;
mod core;
mod registry;

pub use body::ResponseBody;
pub use core::{HandlerFn, HandlerRef, HandlerResolver, IntoHandlerRef};
pub use registry::ControllerRegistry;
