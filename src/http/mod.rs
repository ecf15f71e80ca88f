//! HTTP protocol implementation.
//!
//! This module implements the subset of HTTP/1.1 needed to serve static files
//! from per-host document roots, with keep-alive connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`line`**: Extracts CRLF-terminated lines under a read deadline
//! - **`parser`**: Builds a [`request::Request`] from lines or classifies the failure
//! - **`request`**: HTTP request representation
//! - **`router`**: Resolves host and URL to a file inside the document root
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//! - **`connection`**: The per-connection request-response state machine
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Arm deadline, wait for a request
//!        └──────┬──────┘
//!               │ Request parsed          (idle timeout / EOF → Closed)
//!               │                         (malformed → Writing 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route to a file, build 200 or 404
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close or 400 → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vhttpd::http::connection::Connection;
//! use vhttpd::vhost::VirtualHosts;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let hosts = Arc::new(VirtualHosts::new([("a.com".to_string(), "/srv/a")])?);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let hosts = hosts.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, hosts);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod line;
pub mod request;
pub mod response;
pub mod parser;
pub mod router;
pub mod connection;
pub mod writer;
pub mod mime;
