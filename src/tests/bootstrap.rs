use std::time::Duration;

use tokio::time::timeout;

use crate::config::HostConfig;
use crate::p2p::{Host, format_listen_addrs};
use crate::tests::loopback_config;

#[test]
fn default_config_listens_on_all_interfaces() {
    let config = HostConfig::default();
    assert_eq!(config.listen_addr, "/ip4/0.0.0.0/tcp/0");
}

#[test]
fn address_report_joins_with_spaces() {
    let addrs = vec![
        "/ip4/127.0.0.1/tcp/4001".parse().unwrap(),
        "/ip4/192.168.1.7/tcp/4001".parse().unwrap(),
    ];
    assert_eq!(
        format_listen_addrs(&addrs),
        "/ip4/127.0.0.1/tcp/4001 /ip4/192.168.1.7/tcp/4001"
    );
    assert_eq!(format_listen_addrs(&[]), "");
}

#[tokio::test]
async fn host_reports_bound_loopback_address() {
    let mut host = Host::new(&loopback_config())
        .await
        .expect("Failed to create host");

    let addrs = timeout(Duration::from_secs(5), host.wait_for_listen_addrs())
        .await
        .expect("Timed out waiting for listen address");

    assert!(!addrs.is_empty());
    for addr in &addrs {
        assert!(addr.to_string().starts_with("/ip4/127.0.0.1/tcp/"));
    }

    host.close();
}

#[tokio::test]
async fn invalid_listen_addr_fails_construction() {
    let config = HostConfig {
        listen_addr: "not-a-multiaddr".to_string(),
    };
    assert!(Host::new(&config).await.is_err());
}

#[tokio::test]
async fn shutdown_stops_run_within_bounded_time() {
    let mut host = Host::new(&loopback_config())
        .await
        .expect("Failed to create host");
    let shutdown = host
        .shutdown_handle()
        .expect("Shutdown handle already taken");

    let handle = tokio::spawn(async move {
        host.run().await.expect("Host run failed");
        host
    });

    shutdown.send(()).expect("Host stopped before shutdown");

    let host = timeout(Duration::from_secs(5), handle)
        .await
        .expect("Host did not stop within bounded time")
        .expect("Host task panicked");
    host.close();
}
