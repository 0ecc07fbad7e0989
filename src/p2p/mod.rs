//! Host lifecycle plumbing. Transport negotiation, connection security, and
//! stream multiplexing are delegated to libp2p; this module owns only the
//! construction, address reporting, and shutdown of the local host.

pub mod host;

pub use host::{Host, format_listen_addrs};
