use crate::{
    config::HostConfig,
    p2p::{format_listen_addrs, Host},
    tracer::{TracingConfig, init_tracer},
};

pub mod config;
pub mod error;
pub mod p2p;
pub mod tracer;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracer(TracingConfig::default());
    tracing::info!("Starting p2p host...");

    // Load configuration
    let config = HostConfig::load();

    let mut host = Host::new(&config).await?;
    tracing::info!(peer_id = %host.local_peer_id(), "Host initialized");

    // The address report is the only line this process writes to stdout
    let addrs = host.wait_for_listen_addrs().await;
    println!("{}", format_listen_addrs(&addrs));

    host.run().await?;

    host.close();
    tracing::info!("Host shutdown complete");
    Ok(())
}
