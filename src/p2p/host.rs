use std::task::Poll;
use std::time::Duration;

use libp2p::futures::StreamExt;
use libp2p::swarm::{Config, NetworkBehaviour, SwarmEvent};
use libp2p::{Multiaddr, PeerId, Swarm, Transport, identify, identity, noise, ping, tcp, yamux};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::{config::HostConfig, error::HostError};

/// Protocol string advertised to peers via identify.
const PROTOCOL_VERSION: &str = "p2p-host/0.1.0";

#[derive(NetworkBehaviour)]
pub struct HostBehaviour {
    pub identify: identify::Behaviour,
    pub ping: ping::Behaviour,
}

/// The local host. Exclusively owned; released exactly once, either through
/// `close` or through drop on an early exit path.
pub struct Host {
    swarm: Swarm<HostBehaviour>,
    local_peer_id: PeerId,
    shutdown_signal: Option<oneshot::Sender<()>>,
    shutdown: oneshot::Receiver<()>,
}

impl Host {
    pub async fn new(config: &HostConfig) -> Result<Self, HostError> {
        // Generate identity
        let local_key = identity::Keypair::generate_ed25519();
        let local_peer_id = PeerId::from(local_key.public());

        // Create transport with encryption
        let transport = tcp::tokio::Transport::new(tcp::Config::default().nodelay(true))
            .upgrade(libp2p::core::upgrade::Version::V1)
            .authenticate(noise::Config::new(&local_key)?)
            .multiplex(yamux::Config::default())
            .boxed();

        // Create identify behaviour
        let identify = identify::Behaviour::new(identify::Config::new(
            PROTOCOL_VERSION.to_string(),
            local_key.public(),
        ));

        let behaviour = HostBehaviour {
            identify,
            ping: ping::Behaviour::new(
                ping::Config::default().with_timeout(Duration::from_secs(60)),
            ),
        };

        // Create swarm
        let mut swarm = Swarm::new(
            transport,
            behaviour,
            local_peer_id,
            Config::with_tokio_executor(),
        );

        let listen_addr: Multiaddr = config.listen_addr.parse()?;
        swarm.listen_on(listen_addr)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        Ok(Host {
            swarm,
            local_peer_id,
            shutdown_signal: Some(shutdown_tx),
            shutdown: shutdown_rx,
        })
    }

    pub fn local_peer_id(&self) -> &PeerId {
        &self.local_peer_id
    }

    /// Sender half used to stop `run` from another task. `None` once taken.
    pub fn shutdown_handle(&mut self) -> Option<oneshot::Sender<()>> {
        self.shutdown_signal.take()
    }

    /// Drives the swarm until the listener reports its first bound address,
    /// then drains already-queued events and snapshots the listeners. A
    /// wildcard listen address expands to one event per interface.
    pub async fn wait_for_listen_addrs(&mut self) -> Vec<Multiaddr> {
        loop {
            match self.swarm.select_next_some().await {
                SwarmEvent::NewListenAddr { address, .. } => {
                    info!("Listening on {}", address);
                    break;
                }
                event => self.handle_event(event),
            }
        }

        std::future::poll_fn(|cx| {
            while let Poll::Ready(Some(event)) = self.swarm.poll_next_unpin(cx) {
                self.handle_event(event);
            }
            Poll::Ready(())
        })
        .await;

        self.swarm.listeners().cloned().collect()
    }

    /// Drives the swarm until a termination signal arrives: SIGINT, SIGTERM,
    /// or the internal shutdown channel.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut ctrl_c = Box::pin(tokio::signal::ctrl_c());
        let mut sigterm = Box::pin(terminate_signal());

        loop {
            tokio::select! {
                event = self.swarm.select_next_some() => {
                    self.handle_event(event);
                }
                res = &mut ctrl_c => {
                    res?;
                    info!("Ctrl+C received, shutting down host gracefully");
                    break;
                }
                res = &mut sigterm => {
                    res?;
                    info!("SIGTERM received, shutting down host gracefully");
                    break;
                }
                _ = &mut self.shutdown => {
                    info!("Shutdown signal received, stopping host");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Releases the host. Taking `self` by value makes a second release
    /// impossible.
    pub fn close(self) {
        info!(peer_id = %self.local_peer_id, "Closing host");
        drop(self.swarm);
    }

    fn handle_event(&mut self, event: SwarmEvent<HostBehaviourEvent>) {
        match event {
            SwarmEvent::NewListenAddr { address, .. } => {
                info!("Listening on {}", address);
            }
            SwarmEvent::ConnectionEstablished { peer_id, .. } => {
                info!("Connected to {}", peer_id);
            }
            SwarmEvent::ConnectionClosed { peer_id, .. } => {
                info!("Disconnected from {}", peer_id);
            }
            SwarmEvent::ListenerError { error, .. } => {
                warn!("Listener error: {}", error);
            }
            SwarmEvent::Behaviour(HostBehaviourEvent::Identify(identify::Event::Received {
                peer_id,
                info,
            })) => {
                info!("Identified peer {}: {}", peer_id, info.protocol_version);
            }
            SwarmEvent::Behaviour(HostBehaviourEvent::Ping(ping::Event { peer, result, .. })) => {
                debug!("Ping from {}: {:?}", peer, result);
            }
            _ => {}
        }
    }
}

/// Space-separated listing of bound addresses, printed once at startup.
pub fn format_listen_addrs(addrs: &[Multiaddr]) -> String {
    addrs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(unix)]
async fn terminate_signal() -> std::io::Result<()> {
    let mut stream = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    stream.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate_signal() -> std::io::Result<()> {
    std::future::pending::<()>().await;
    Ok(())
}
