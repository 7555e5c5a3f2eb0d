//! Peer record stored by k-buckets.
//!
//! A bucket keeps `Arc<Peer>` handles rather than copies, so liveness flags
//! are interior-mutable: the transport flips `alive` or `ip_verified` on its
//! own handle and every bucket holding the peer observes the change.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::entities::NodeId;

/// How long a refreshed peer stays valid without another contact.
pub const PEER_TTL: Duration = Duration::from_secs(60 * 60);

/// Classification of a peer by how long it has been known.
///
/// Long-lived peers are the most valuable routing entries: a node that has
/// stayed online for hours is likely to keep doing so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeerType {
    /// Known for less than one hour.
    Fresh,
    /// Known for one to two hours.
    Established,
    /// Known for two hours or more.
    Stable,
}

impl PeerType {
    fn from_age(age: Duration) -> Self {
        match age.as_secs() / 3600 {
            0 => Self::Fresh,
            1 => Self::Established,
            _ => Self::Stable,
        }
    }
}

#[derive(Debug)]
struct Freshness {
    created_at: Instant,
    last_seen: Option<Instant>,
    expires_at: Option<Instant>,
    peer_type: PeerType,
}

/// A known DHT peer.
///
/// Two peers are equal iff their identifiers are equal.
pub struct Peer {
    id: NodeId,
    ip: IpAddr,
    udp_port: u16,
    tcp_port: u16,
    ip_verified: AtomicBool,
    alive: AtomicBool,
    freshness: Mutex<Freshness>,
}

impl Peer {
    /// Create a peer that is neither verified nor alive yet.
    pub fn new(id: NodeId, ip: IpAddr, udp_port: u16, tcp_port: u16) -> Self {
        Self {
            id,
            ip,
            udp_port,
            tcp_port,
            ip_verified: AtomicBool::new(false),
            alive: AtomicBool::new(false),
            freshness: Mutex::new(Freshness {
                created_at: Instant::now(),
                last_seen: None,
                expires_at: None,
                peer_type: PeerType::Fresh,
            }),
        }
    }

    /// Builder: set the IP-verified flag.
    #[must_use]
    pub fn with_ip_verified(self, verified: bool) -> Self {
        self.set_ip_verified(verified);
        self
    }

    /// Builder: set the alive flag.
    #[must_use]
    pub fn with_alive(self, alive: bool) -> Self {
        self.set_alive(alive);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn udp_port(&self) -> u16 {
        self.udp_port
    }

    pub fn tcp_port(&self) -> u16 {
        self.tcp_port
    }

    pub fn udp_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.udp_port)
    }

    pub fn tcp_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.tcp_port)
    }

    /// True once the peer has answered from the IP it claims.
    pub fn is_ip_verified(&self) -> bool {
        self.ip_verified.load(Ordering::Acquire)
    }

    pub fn set_ip_verified(&self, verified: bool) {
        self.ip_verified.store(verified, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::Release);
    }

    /// When the peer record was created.
    pub fn created_at(&self) -> Instant {
        self.freshness.lock().created_at
    }

    /// Last successful contact, if any.
    pub fn last_seen(&self) -> Option<Instant> {
        self.freshness.lock().last_seen
    }

    /// Deadline after which the peer should be probed again.
    pub fn expires_at(&self) -> Option<Instant> {
        self.freshness.lock().expires_at
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at() {
            Some(deadline) => now >= deadline,
            None => true,
        }
    }

    pub fn peer_type(&self) -> PeerType {
        self.freshness.lock().peer_type
    }

    /// Record a successful contact now.
    ///
    /// Marks the peer alive, pushes its expiry out by [`PEER_TTL`] and
    /// reclassifies it by age.
    pub fn update_type(&self) {
        self.update_type_at(Instant::now());
    }

    /// Record a successful contact at `now`.
    pub fn update_type_at(&self, now: Instant) {
        let mut freshness = self.freshness.lock();
        let age = now.saturating_duration_since(freshness.created_at);
        freshness.peer_type = PeerType::from_age(age);
        freshness.last_seen = Some(now);
        freshness.expires_at = Some(now + PEER_TTL);
        drop(freshness);

        self.set_alive(true);
    }
}

impl PartialEq for Peer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Peer {}

impl Hash for Peer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peer")
            .field("id", &self.id)
            .field("ip", &self.ip)
            .field("udp_port", &self.udp_port)
            .field("tcp_port", &self.tcp_port)
            .field("ip_verified", &self.is_ip_verified())
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.udp_addr())
    }
}
