use std::collections::HashMap;

/// Represents a parsed HTTP request from a client.
///
/// Only produced by the parser once the request line and the full header
/// block have been validated. `Host` and `Connection` are lifted out of the
/// header map into [`Request::host`] and [`Request::close`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method; always `GET` for a parsed request
    pub method: String,
    /// The request URL, always starting with `/`
    pub url: String,
    /// Protocol version as sent (typically "HTTP/1.1")
    pub version: String,
    /// Remaining headers keyed by canonical name
    pub headers: HashMap<String, String>,
    /// Value of the mandatory `Host` header
    pub host: String,
    /// Set when the client sent `Connection: close`
    pub close: bool,
}

impl Request {
    /// Retrieves a header value by canonical name.
    ///
    /// `Host` and `Connection` are never found here.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Determines whether the connection should remain open after the response.
    ///
    /// HTTP/1.1 defaults to keep-alive; only `Connection: close` ends it.
    pub fn keep_alive(&self) -> bool {
        !self.close
    }
}
