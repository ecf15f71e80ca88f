use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{Instrument, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::vhost::VirtualHosts;

pub async fn run(cfg: &Config, hosts: Arc<VirtualHosts>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, hosts, cfg.read_timeout()).await
}

/// Accepts connections forever, one task each.
///
/// Returns only when `accept` fails; errors inside a connection are logged
/// by its own task.
pub async fn serve(
    listener: TcpListener,
    hosts: Arc<VirtualHosts>,
    read_timeout: Duration,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let hosts = hosts.clone();
        let span = tracing::info_span!("conn", %peer);
        tokio::spawn(
            async move {
                let mut conn = Connection::with_timeout(socket, hosts, read_timeout);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            }
            .instrument(span),
        );
    }
}
