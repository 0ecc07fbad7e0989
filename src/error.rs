use libp2p::core::transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Invalid listen address: {0}")]
    ListenAddr(#[from] libp2p::core::multiaddr::Error),
    #[error("Transport security setup failed: {0}")]
    Noise(#[from] libp2p::noise::Error),
    #[error("Failed to bind listener: {0}")]
    Listen(#[from] TransportError<std::io::Error>),
}
