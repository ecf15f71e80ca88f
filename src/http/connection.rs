use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::http::line::LineReader;
use crate::http::parser::{ParseError, read_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::router::{Resolution, Router};
use crate::http::writer::ResponseWriter;
use crate::vhost::VirtualHosts;

/// Inactivity deadline armed before each request.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Connection<S> {
    reader: LineReader<S>,
    router: Router,
    read_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(Response),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, hosts: Arc<VirtualHosts>) -> Self {
        Self::with_timeout(stream, hosts, DEFAULT_READ_TIMEOUT)
    }

    pub fn with_timeout(stream: S, hosts: Arc<VirtualHosts>, read_timeout: Duration) -> Self {
        Self {
            reader: LineReader::new(stream),
            router: Router::new(hosts),
            read_timeout,
            state: ConnectionState::Reading,
        }
    }

    /// Serves requests until the peer leaves, a response forces a close, or
    /// an I/O error occurs. The stream is shut down on every exit path
    /// except a failed write.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = self.read_next().await;
                }

                ConnectionState::Processing(req) => {
                    let response = self.handle_request(req).await;
                    self.state = ConnectionState::Writing(response);
                }

                ConnectionState::Writing(response) => {
                    let mut writer = ResponseWriter::prepare(&response).await?;
                    writer.write_to_stream(self.reader.get_mut()).await?;
                    tracing::info!(status = response.status.as_u16(), "response sent");

                    if response.should_close() {
                        self.state = ConnectionState::Closed;
                    } else {
                        self.state = ConnectionState::Reading; // go back for next request
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        // Peer may already be gone; nothing left to report.
        let _ = self.reader.get_mut().shutdown().await;
        Ok(())
    }

    async fn read_next(&mut self) -> ConnectionState {
        self.reader.arm(self.read_timeout);
        let (result, received) = read_request(&mut self.reader).await;

        match result {
            Ok(req) => {
                tracing::debug!(method = %req.method, url = %req.url, host = %req.host, "request");
                ConnectionState::Processing(req)
            }
            Err(ParseError::Closed) => {
                tracing::debug!("peer closed connection");
                ConnectionState::Closed
            }
            Err(ParseError::TimedOut) if !received => {
                tracing::debug!("idle timeout");
                ConnectionState::Closed
            }
            Err(ParseError::Io(e)) if !received => {
                tracing::debug!(error = %e, "read failed before request");
                ConnectionState::Closed
            }
            Err(e) => {
                tracing::info!(error = %e, "bad request");
                ConnectionState::Writing(Response::bad_request())
            }
        }
    }

    async fn handle_request(&self, req: Request) -> Response {
        match self.router.resolve(&req).await {
            Resolution::Found(path) => {
                tracing::debug!(path = %path.display(), "resolved");
                Response::ok(req, path).await
            }
            Resolution::NotFound => Response::not_found(req),
        }
    }
}
