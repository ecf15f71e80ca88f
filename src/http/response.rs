use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::http::mime::mime_type_for_path;
use crate::http::request::Request;

/// Protocol version written on every status line.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): File found and served
/// - `BadRequest` (400): Malformed request, connection is closed afterwards
/// - `NotFound` (404): No file for this host and URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use vhttpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use vhttpd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// Formats a timestamp as an RFC 1123 GMT date.
pub fn http_date(time: SystemTime) -> String {
    httpdate::fmt_http_date(time)
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// The body is never held here: `file` names the file the writer loads.
#[derive(Debug)]
pub struct Response {
    pub version: String,
    pub status: StatusCode,
    /// HTTP headers as key-value pairs, sorted only when written
    pub headers: HashMap<String, String>,
    /// The request this answers; `None` for a bad request
    pub request: Option<Request>,
    /// File to send as the body
    pub file: Option<PathBuf>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::NotFound)
///     .header("Date", http_date(SystemTime::now()))
///     .request(req)
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    request: Option<Request>,
    file: Option<PathBuf>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            request: None,
            file: None,
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Attaches the originating request.
    pub fn request(mut self, request: Request) -> Self {
        self.request = Some(request);
        self
    }

    /// Sets the file to stream as the body.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Builds the final Response.
    ///
    /// Adds `Connection: close` when the attached request asked for it.
    pub fn build(mut self) -> Response {
        if self.request.as_ref().is_some_and(|r| r.close) {
            self.headers
                .insert("Connection".to_string(), "close".to_string());
        }

        Response {
            version: HTTP_VERSION.to_string(),
            status: self.status,
            headers: self.headers,
            request: self.request,
            file: self.file,
        }
    }
}

impl Response {
    /// Creates a 200 OK response serving `path`.
    ///
    /// If the file can no longer be stat'ed, `Last-Modified` falls back to
    /// the Unix epoch and `Content-Length` to zero; the writer corrects the
    /// length from the bytes it actually loads.
    pub async fn ok(request: Request, path: PathBuf) -> Self {
        let (modified, len) = match tokio::fs::metadata(&path).await {
            Ok(meta) => (meta.modified().unwrap_or(UNIX_EPOCH), meta.len()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "stat failed on resolved file");
                (UNIX_EPOCH, 0)
            }
        };

        ResponseBuilder::new(StatusCode::Ok)
            .header("Date", http_date(SystemTime::now()))
            .header("Last-Modified", http_date(modified))
            .header("Content-Type", mime_type_for_path(&path))
            .header("Content-Length", len.to_string())
            .request(request)
            .file(path)
            .build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found(request: Request) -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .header("Date", http_date(SystemTime::now()))
            .request(request)
            .build()
    }

    /// Creates a 400 Bad Request response. Always closes the connection.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest)
            .header("Date", http_date(SystemTime::now()))
            .header("Connection", "close")
            .build()
    }

    /// Whether the connection must be closed once this response is written.
    pub fn should_close(&self) -> bool {
        self.status == StatusCode::BadRequest
            || self.request.as_ref().is_none_or(|r| r.close)
    }
}
