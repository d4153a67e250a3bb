use std::collections::HashMap;

/// HTTP request methods.
///
/// Only GET and POST are served. Any other method token parses to `INVALID`,
/// which the connection answers with 400 Bad Request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Unrecognized method, or a request that failed to parse
    #[default]
    INVALID,
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit data (served like GET)
    POST,
}

/// Represents a parsed HTTP request from a client.
///
/// Built once per connection and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET, POST or INVALID)
    pub method: Method,
    /// Host header value with any `:port` suffix removed
    pub host: String,
    /// Raw request target (e.g., "/index.html")
    pub path: String,
    /// Request headers as key-value pairs, keys are case-sensitive
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    host: Option<String>,
    path: Option<String>,
    headers: HashMap<String, String>,
}

impl Method {
    /// Maps a method token to a `Method`.
    ///
    /// Matching is case-sensitive. Unknown tokens are `INVALID` rather than
    /// an error.
    ///
    /// # Example
    ///
    /// ```
    /// # use hostel::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::INVALID);
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            _ => Method::INVALID,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            host: None,
            path: None,
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            host: self.host.ok_or("host missing")?,
            path: self.path.ok_or("path missing")?,
            headers: self.headers,
        })
    }
}

impl Request {
    /// The request every parse failure collapses into.
    ///
    /// Method is `INVALID`, host and path are empty.
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.method != Method::INVALID
    }

    /// Retrieves a header value by its exact (case-sensitive) name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(key)
            .map(|v| v.as_str())
    }
}
