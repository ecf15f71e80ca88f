//! vhttpd - Static file server with virtual hosts
//!
//! Core library for the HTTP protocol layer and its bootstrap.

pub mod config;
pub mod http;
pub mod server;
pub mod vhost;
