use http::Method;
use std::fmt;
use std::sync::Arc;

/// Error raised when a route registration is rejected.
///
/// All variants are registration-time failures: the route table never stores
/// a route that would later fail at dispatch because of its own shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The method is not one of GET, POST, PUT or DELETE.
    UnsupportedMethod {
        /// The method string as given by the caller
        method: String,
    },
    /// The URI pattern was empty.
    EmptyPattern,
    /// The handler reference is not of the form `Controller@action`.
    ///
    /// Exactly one `@` separating two non-empty parts is required.
    MalformedHandlerReference {
        /// The reference string as given by the caller
        reference: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnsupportedMethod { method } => {
                write!(
                    f,
                    "unsupported method '{}': expected one of GET, POST, PUT, DELETE",
                    method
                )
            }
            RouteError::EmptyPattern => write!(f, "URI pattern must not be empty"),
            RouteError::MalformedHandlerReference { reference } => {
                write!(
                    f,
                    "malformed handler reference '{}': expected 'Controller@action'",
                    reference
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// One `/`-delimited component of a URI pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches a request segment only on byte-for-byte equality.
    Literal(String),
    /// Matches any request segment (including an empty one) and binds its
    /// value under the given name.
    ///
    /// The name is an `Arc<str>` so extracted parameters can share it with
    /// the route instead of copying it per request.
    Param(Arc<str>),
}

impl Segment {
    /// Classify a raw pattern segment.
    ///
    /// Only a segment fully wrapped as `{name}` with a non-empty interior is
    /// a placeholder; everything else (stray braces included) is a literal.
    pub(crate) fn parse(raw: &str) -> Self {
        if raw.len() > 2 && raw.starts_with('{') && raw.ends_with('}') {
            Segment::Param(Arc::from(&raw[1..raw.len() - 1]))
        } else {
            Segment::Literal(raw.to_string())
        }
    }

    /// Returns `true` if this segment is a `{name}` placeholder.
    #[must_use]
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(lit) => write!(f, "{}", lit),
            Segment::Param(name) => write!(f, "{{{}}}", name),
        }
    }
}

/// Split a URI pattern or request path into its segments.
///
/// Leading and trailing slashes are ignored. An empty trimmed string splits
/// into one empty segment, so `/` has exactly one (empty) segment and only
/// matches patterns with the same shape.
pub(crate) fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.trim_matches('/').split('/')
}

/// Reference to a handler unit: a controller name plus an action method name.
///
/// Parsed eagerly from the `Controller@action` registration string so a typo
/// fails at `register` time rather than on the first request that hits the
/// route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerRef {
    /// Name of the handler unit (e.g. `UserController`)
    pub controller: String,
    /// Name of the method on that unit (e.g. `show`)
    pub action: String,
}

impl HandlerRef {
    /// Parse a `Controller@action` reference string.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedHandlerReference`] unless the string
    /// contains exactly one `@` separating two non-empty parts.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let mut parts = raw.split('@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(controller), Some(action), None)
                if !controller.is_empty() && !action.is_empty() =>
            {
                Ok(Self {
                    controller: controller.to_string(),
                    action: action.to_string(),
                })
            }
            _ => Err(RouteError::MalformedHandlerReference {
                reference: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.controller, self.action)
    }
}

/// A registered route: method, pre-split pattern, handler and rule names.
#[derive(Debug, Clone)]
pub struct Route {
    /// HTTP method, normalized to upper case
    pub method: Method,
    /// The URI pattern as given at registration (for logging and dumps)
    pub pattern: String,
    /// The pattern split into segments, computed once at registration
    pub segments: Vec<Segment>,
    /// Handler unit to invoke on match
    pub handler: HandlerRef,
    /// Ordered authorization rule names to run before the handler
    pub middleware: Vec<String>,
}

impl Route {
    /// Build and validate a route from its registration inputs.
    ///
    /// The method string is case-insensitive. Leading and trailing slashes
    /// in the pattern are ignored.
    ///
    /// # Errors
    ///
    /// Fails fast with a [`RouteError`] on an unsupported method, an empty
    /// pattern, or a malformed handler reference.
    pub fn new(
        method: &str,
        pattern: &str,
        handler_ref: &str,
        middleware: Vec<String>,
    ) -> Result<Self, RouteError> {
        let method = parse_method(method)?;
        Self::with_method(method, pattern, handler_ref, middleware)
    }

    pub(crate) fn with_method(
        method: Method,
        pattern: &str,
        handler_ref: &str,
        middleware: Vec<String>,
    ) -> Result<Self, RouteError> {
        if pattern.is_empty() {
            return Err(RouteError::EmptyPattern);
        }
        let handler = HandlerRef::parse(handler_ref)?;
        let segments = split_segments(pattern).map(Segment::parse).collect();
        Ok(Self {
            method,
            pattern: pattern.to_string(),
            segments,
            handler,
            middleware,
        })
    }
}

/// Parse and normalize a registration method string.
///
/// Case-insensitive; only the four supported verbs are accepted.
pub(crate) fn parse_method(raw: &str) -> Result<Method, RouteError> {
    let supported = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    let normalized = raw.to_ascii_uppercase();
    match Method::from_bytes(normalized.as_bytes()) {
        Ok(method) if supported.contains(&method) => Ok(method),
        _ => Err(RouteError::UnsupportedMethod {
            method: raw.to_string(),
        }),
    }
}
