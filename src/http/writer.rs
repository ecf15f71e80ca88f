use anyhow::Context;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Serializes the status line and headers, keys in ascending order.
///
/// `body_len` replaces any `Content-Length` header so the framing always
/// matches the bytes that follow.
pub fn serialize_head(resp: &Response, body_len: Option<usize>) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    let content_length = body_len.map(|n| n.to_string());
    let mut headers: Vec<(&str, &str)> = resp
        .headers
        .iter()
        .map(|(k, v)| match (k.as_str(), &content_length) {
            ("Content-Length", Some(len)) => (k.as_str(), len.as_str()),
            _ => (k.as_str(), v.as_str()),
        })
        .collect();
    if let Some(len) = &content_length {
        if !resp.headers.contains_key("Content-Length") {
            headers.push(("Content-Length", len.as_str()));
        }
    }
    headers.sort_unstable_by(|a, b| a.0.cmp(b.0));

    for (k, v) in headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    /// Loads the body file, if any, and serializes the whole response.
    pub async fn prepare(response: &Response) -> anyhow::Result<Self> {
        let body = match &response.file {
            Some(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?,
            None => Vec::new(),
        };

        let body_len = response.file.as_ref().map(|_| body.len());
        let mut buffer = serialize_head(response, body_len);
        buffer.extend_from_slice(&body);

        Ok(Self { buffer, written: 0 })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
