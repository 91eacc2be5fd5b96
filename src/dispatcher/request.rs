use http::Method;
use smallvec::SmallVec;
use std::sync::Arc;

/// Header a POST request uses to ask for PUT, DELETE or PATCH handling
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the hot path
///
/// Header names use `Arc<str>` since the same names repeat on every request.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request attributes supplied by the transport
#[derive(Debug, Clone)]
pub struct Request {
    /// Method as received on the wire
    pub method: Method,
    /// Full request URI, possibly with a query string
    pub uri: String,
    /// Request headers (looked up case-insensitively)
    pub headers: HeaderVec,
    /// Path of the entry script; its directory is stripped from `uri` before matching
    pub script_name: Option<String>,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: HeaderVec::new(),
            script_name: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = Some(script_name.into());
        self
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the response body must be discarded (HEAD requests)
    #[inline]
    #[must_use]
    pub fn suppresses_body(&self) -> bool {
        self.method == Method::HEAD
    }

    /// The method routes are looked up under
    ///
    /// HEAD is handled as GET. A POST carrying `X-HTTP-Method-Override: PUT`,
    /// `DELETE` or `PATCH` is handled as that method; any other override value is
    /// ignored.
    #[must_use]
    pub fn effective_method(&self) -> Method {
        if self.method == Method::HEAD {
            return Method::GET;
        }

        if self.method == Method::POST {
            match self.get_header(METHOD_OVERRIDE_HEADER).map(str::trim) {
                Some("PUT") => return Method::PUT,
                Some("DELETE") => return Method::DELETE,
                Some("PATCH") => return Method::PATCH,
                _ => {}
            }
        }

        self.method.clone()
    }

    /// Directory of the entry script, with a trailing `/`
    ///
    /// `/app/index.php` gives `/app/`; no script name gives `/`.
    #[must_use]
    pub fn base_path(&self) -> String {
        match &self.script_name {
            Some(script) => match script.rfind('/') {
                Some(idx) => format!("{}/", &script[..idx]),
                None => "/".to_string(),
            },
            None => "/".to_string(),
        }
    }

    /// Path matched against route patterns
    ///
    /// The base path is stripped, the query string dropped, and the result trimmed
    /// of `/` and given a single leading `/`.
    #[must_use]
    pub fn current_path(&self) -> String {
        let base = self.base_path();
        let uri = self.uri.as_str();
        let relative = uri
            .strip_prefix(base.as_str())
            .or_else(|| {
                // `/app` only counts as the directory itself, not as `/application`
                uri.strip_prefix(base.trim_end_matches('/'))
                    .filter(|rest| rest.is_empty() || rest.starts_with('?'))
            })
            .unwrap_or(uri);

        let without_query = match relative.find('?') {
            Some(idx) => &relative[..idx],
            None => relative,
        };

        let trimmed = without_query.trim_matches('/');
        let mut path = String::with_capacity(trimmed.len() + 1);
        path.push('/');
        path.push_str(trimmed);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_is_handled_as_get() {
        let req = Request::new(Method::HEAD, "/x");
        assert_eq!(req.effective_method(), Method::GET);
        assert!(req.suppresses_body());
    }

    #[test]
    fn test_method_override_case_insensitive_header_name() {
        let req = Request::new(Method::POST, "/x").with_header("x-http-method-override", "DELETE");
        assert_eq!(req.effective_method(), Method::DELETE);
    }

    #[test]
    fn test_method_override_rejects_other_values() {
        for value in ["GET", "OPTIONS", "delete", "TRACE"] {
            let req = Request::new(Method::POST, "/x").with_header(METHOD_OVERRIDE_HEADER, value);
            assert_eq!(req.effective_method(), Method::POST, "{value}");
        }
    }

    #[test]
    fn test_method_override_only_applies_to_post() {
        let req = Request::new(Method::GET, "/x").with_header(METHOD_OVERRIDE_HEADER, "PUT");
        assert_eq!(req.effective_method(), Method::GET);
    }

    #[test]
    fn test_base_path() {
        assert_eq!(Request::new(Method::GET, "/").base_path(), "/");
        let req = Request::new(Method::GET, "/").with_script_name("/index.php");
        assert_eq!(req.base_path(), "/");
        let req = Request::new(Method::GET, "/").with_script_name("/app/public/index.php");
        assert_eq!(req.base_path(), "/app/public/");
    }

    #[test]
    fn test_current_path() {
        let cases = [
            ("/", "/"),
            ("/hello/", "/hello"),
            ("/hello/world?x=1&y=2", "/hello/world"),
            ("/?debug", "/"),
            ("//double//", "/double"),
        ];
        for (uri, expected) in cases {
            assert_eq!(Request::new(Method::GET, uri).current_path(), expected, "{uri}");
        }
    }

    #[test]
    fn test_current_path_strips_script_directory() {
        let req = Request::new(Method::GET, "/app/admin/1?x=1").with_script_name("/app/index.php");
        assert_eq!(req.current_path(), "/admin/1");

        let req = Request::new(Method::GET, "/app").with_script_name("/app/index.php");
        assert_eq!(req.current_path(), "/");

        let req = Request::new(Method::GET, "/app?x=1").with_script_name("/app/index.php");
        assert_eq!(req.current_path(), "/");
    }

    #[test]
    fn test_uri_outside_script_directory_is_kept_whole() {
        let req = Request::new(Method::GET, "/application/x").with_script_name("/app/index.php");
        assert_eq!(req.current_path(), "/application/x");

        let req = Request::new(Method::GET, "/apple?x=1").with_script_name("/app/index.php");
        assert_eq!(req.current_path(), "/apple");
    }
}
