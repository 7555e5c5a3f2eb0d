//! Network addresses a peer can be looked up by.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Address handed to a lookup by the transport that received a packet.
///
/// Peers carry separate UDP and TCP ports, so the address kind decides which
/// port field a lookup matches against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkAddr {
    /// Datagram endpoint (Kademlia traffic).
    Udp(SocketAddr),
    /// Stream endpoint (transfers).
    Tcp(SocketAddr),
    /// Bare IP address without a transport.
    Ip(IpAddr),
    /// Local socket path.
    Unix(PathBuf),
}

impl NetworkAddr {
    /// Short name of the address kind, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Udp(_) => "udp",
            Self::Tcp(_) => "tcp",
            Self::Ip(_) => "ip",
            Self::Unix(_) => "unix",
        }
    }

    /// IP address, if this kind carries one.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Self::Udp(addr) | Self::Tcp(addr) => Some(addr.ip()),
            Self::Ip(ip) => Some(*ip),
            Self::Unix(_) => None,
        }
    }
}

impl fmt::Display for NetworkAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Udp(addr) => write!(f, "udp://{}", addr),
            Self::Tcp(addr) => write!(f, "tcp://{}", addr),
            Self::Ip(ip) => write!(f, "ip://{}", ip),
            Self::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}
