use std::collections::HashMap;

use tokio::io::AsyncRead;

use crate::http::line::{LineError, LineReader};
use crate::http::request::Request;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Peer closed the stream before sending anything.
    #[error("connection closed")]
    Closed,
    #[error("read deadline elapsed")]
    TimedOut,
    #[error("connection ended mid-request")]
    Truncated,
    #[error("bad request: {0}")]
    BadRequest(&'static str),
    #[error(transparent)]
    Io(std::io::Error),
}

impl From<LineError> for ParseError {
    fn from(err: LineError) -> Self {
        match err {
            LineError::TimedOut => ParseError::TimedOut,
            LineError::Truncated => ParseError::Truncated,
            LineError::InvalidUtf8 => ParseError::BadRequest("non UTF-8 line"),
            LineError::Io(e) => ParseError::Io(e),
        }
    }
}

/// Reads one request from the stream.
///
/// The second value reports whether any bytes of this request were read
/// before the result was decided, whatever the result is. An idle
/// connection and a stalled half-sent request differ only by this flag.
pub async fn read_request<R>(reader: &mut LineReader<R>) -> (Result<Request, ParseError>, bool)
where
    R: AsyncRead + Unpin,
{
    let result = read_request_inner(reader).await;
    (result, reader.received())
}

async fn read_request_inner<R>(reader: &mut LineReader<R>) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let line = reader.read_line().await?.ok_or(ParseError::Closed)?;
    let (method, url, version) = parse_request_line(&line)?;

    let mut headers = HashMap::new();
    let mut host = None;
    let mut close = false;

    loop {
        // EOF inside the header block means the request never finished.
        let line = reader.read_line().await?.ok_or(ParseError::Truncated)?;
        if line.is_empty() {
            break;
        }

        let (key, value) = parse_header_line(&line)?;
        match key.as_str() {
            "Host" => host = Some(value),
            "Connection" => {
                if value.eq_ignore_ascii_case("close") {
                    close = true;
                }
            }
            _ => {
                headers.insert(key, value);
            }
        }
    }

    let host = host.ok_or(ParseError::BadRequest("missing Host header"))?;

    Ok(Request {
        method,
        url,
        version,
        headers,
        host,
        close,
    })
}

/// Splits a request line into method, URL and protocol version.
pub fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [method, url, version] = parts[..] else {
        return Err(ParseError::BadRequest("request line must have three parts"));
    };

    if method != "GET" {
        return Err(ParseError::BadRequest("method not allowed"));
    }
    if !url.starts_with('/') {
        return Err(ParseError::BadRequest("URL must start with '/'"));
    }

    Ok((method.to_string(), url.to_string(), version.to_string()))
}

/// Splits a `Key: Value` header line, canonicalizing the key.
pub fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
    let (key, value) = line
        .split_once(": ")
        .ok_or(ParseError::BadRequest("malformed header line"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::BadRequest("empty header name"));
    }

    Ok((canonical_header_key(key), value.trim().to_string()))
}

/// Canonical form of a header name: `content-type` becomes `Content-Type`.
///
/// Keys containing characters outside the HTTP token set are returned as-is.
pub fn canonical_header_key(key: &str) -> String {
    if !key.bytes().all(is_token_byte) {
        return key.to_string();
    }

    let mut upper = true;
    key.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
