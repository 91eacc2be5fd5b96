use std::fmt;

/// Routing error
///
/// Raised at registration time for bad patterns, methods and handler
/// references, and at dispatch time when a deferred `owner@member`
/// reference cannot be resolved.
///
/// A path that simply does not match a pattern is *not* an error; the
/// matcher returns `None` and the dispatcher falls through to the next
/// candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The pattern is not valid under the regex grammar used for matching
    MalformedPattern {
        /// The normalized pattern that failed to compile
        pattern: String,
        /// Compiler message
        reason: String,
    },
    /// A method name in a `GET|POST` style list is empty or not a valid token
    InvalidMethod {
        /// The offending method name
        method: String,
    },
    /// A handler reference string is not of the form `owner@member`
    InvalidHandlerReference {
        /// The raw reference string
        reference: String,
    },
    /// A deferred handler reference could not be resolved at invocation time
    UnresolvableHandler {
        /// Owner (controller) name
        owner: String,
        /// Member (action) name
        member: String,
    },
    /// A declarative route file could not be read or parsed
    RouteFile {
        /// Path of the route file
        path: String,
        /// Underlying read/parse failure
        reason: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::MalformedPattern { pattern, reason } => {
                write!(f, "Malformed route pattern '{}': {}", pattern, reason)
            }
            RouterError::InvalidMethod { method } => {
                write!(f, "Invalid HTTP method '{}' in route registration", method)
            }
            RouterError::InvalidHandlerReference { reference } => {
                write!(
                    f,
                    "Invalid handler reference '{}'. Expected format: owner@member",
                    reference
                )
            }
            RouterError::UnresolvableHandler { owner, member } => {
                write!(
                    f,
                    "Handler reference '{}@{}' could not be resolved",
                    owner, member
                )
            }
            RouterError::RouteFile { path, reason } => {
                write!(f, "Failed to load route file '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for RouterError {}
