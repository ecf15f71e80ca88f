use std::sync::Arc;

use vhttpd::config::Config;
use vhttpd::server;
use vhttpd::vhost::VirtualHosts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let hosts = Arc::new(VirtualHosts::from_config(&cfg.virtual_hosts)?);
    if hosts.is_empty() {
        tracing::warn!("No virtual hosts configured; every request will get 404");
    }

    tokio::select! {
        res = server::listener::run(&cfg, hosts) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
