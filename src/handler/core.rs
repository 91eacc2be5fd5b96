use crate::error::RouterError;
use crate::pattern::Params;
use std::fmt;
use std::sync::Arc;

use super::ResponseBody;

/// Shared, directly invocable handler
pub type HandlerFn = Arc<dyn Fn(&Params, &mut ResponseBody) -> anyhow::Result<()> + Send + Sync>;

/// A handler attached to a route, before-middleware, not-found or completion slot
#[derive(Clone)]
pub enum HandlerRef {
    /// Invoked as-is
    Direct(HandlerFn),
    /// Resolved through a [`HandlerResolver`] at invocation time
    Deferred {
        owner: Arc<str>,
        member: Arc<str>,
    },
}

impl HandlerRef {
    /// Wrap a closure
    pub fn direct<F>(f: F) -> Self
    where
        F: Fn(&Params, &mut ResponseBody) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        HandlerRef::Direct(Arc::new(f))
    }

    pub fn deferred(owner: &str, member: &str) -> Self {
        HandlerRef::Deferred {
            owner: Arc::from(owner),
            member: Arc::from(member),
        }
    }

    /// Parse an `owner@member` reference
    ///
    /// The string is split at the first `@`; both halves must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidHandlerReference`] otherwise.
    pub fn parse(reference: &str) -> Result<Self, RouterError> {
        match reference.trim().split_once('@') {
            Some((owner, member)) if !owner.is_empty() && !member.is_empty() => {
                Ok(Self::deferred(owner, member))
            }
            _ => Err(RouterError::InvalidHandlerReference {
                reference: reference.to_string(),
            }),
        }
    }

    /// Human-readable label for logs and route dumps
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            HandlerRef::Direct(_) => "<closure>".to_string(),
            HandlerRef::Deferred { owner, member } => format!("{owner}@{member}"),
        }
    }

    /// Invoke the handler, resolving deferred references through `resolver`
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnresolvableHandler`] when a deferred reference has no
    /// resolver or the resolver does not know it. Handler failures are returned
    /// unchanged.
    pub fn invoke(
        &self,
        resolver: Option<&dyn HandlerResolver>,
        params: &Params,
        body: &mut ResponseBody,
    ) -> anyhow::Result<()> {
        match self {
            HandlerRef::Direct(f) => f(params, body),
            HandlerRef::Deferred { owner, member } => {
                let target = resolver
                    .and_then(|r| r.resolve(owner, member))
                    .ok_or_else(|| RouterError::UnresolvableHandler {
                        owner: owner.to_string(),
                        member: member.to_string(),
                    })?;
                target(params, body)
            }
        }
    }
}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Direct(_) => f.write_str("Direct(<closure>)"),
            HandlerRef::Deferred { owner, member } => f
                .debug_struct("Deferred")
                .field("owner", owner)
                .field("member", member)
                .finish(),
        }
    }
}

/// Conversion accepted by every registration method
///
/// Strings are parsed as `owner@member` at registration time, so dispatch never sees
/// a parse error.
pub trait IntoHandlerRef {
    fn into_handler_ref(self) -> Result<HandlerRef, RouterError>;
}

impl IntoHandlerRef for HandlerRef {
    fn into_handler_ref(self) -> Result<HandlerRef, RouterError> {
        Ok(self)
    }
}

impl IntoHandlerRef for &str {
    fn into_handler_ref(self) -> Result<HandlerRef, RouterError> {
        HandlerRef::parse(self)
    }
}

impl IntoHandlerRef for String {
    fn into_handler_ref(self) -> Result<HandlerRef, RouterError> {
        HandlerRef::parse(&self)
    }
}

/// Resolves deferred `owner@member` references to invocable handlers
///
/// Supplied by the host application; the router depends on it but does not own the
/// controllers behind it.
pub trait HandlerResolver: Send + Sync {
    fn resolve(&self, owner: &str, member: &str) -> Option<HandlerFn>;
}

impl<F> HandlerResolver for F
where
    F: Fn(&str, &str) -> Option<HandlerFn> + Send + Sync,
{
    fn resolve(&self, owner: &str, member: &str) -> Option<HandlerFn> {
        self(owner, member)
    }
}
