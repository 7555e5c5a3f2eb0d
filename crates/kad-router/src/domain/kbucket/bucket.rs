//! K-Bucket implementation for Kademlia routing.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use kad_types::{NetworkAddr, NodeId, Peer};

use crate::adapters::OsEntropySource;
use crate::domain::{find_closest, ConfigError, KBucketConfig, KBucketError};
use crate::ports::{ConfigProvider, EntropySource};

/// Occupancy of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketState {
    /// No peers.
    Empty,
    /// Between one and `max_bucket_size - 1` peers.
    Partial,
    /// Exactly `max_bucket_size` peers.
    Full,
}

#[derive(Debug)]
struct BucketInner {
    /// Oldest first, most recently confirmed last.
    peers: Vec<Arc<Peer>>,
    /// Last successful mutation.
    last_updated: Instant,
}

/// A k-bucket storing up to `max_bucket_size` peers at one distance range
///
/// Peers are held as `Arc<Peer>` handles: liveness changes made by the
/// transport on its own handle are visible here without re-inserting.
///
/// # Security (Eclipse Attack Defense)
///
/// - A full bucket rejects newcomers instead of evicting. The routing table
///   challenges [`oldest_peer`](Self::oldest_peer) and only replaces it if it
///   fails to answer, so a flood of fresh identities cannot flush stable peers.
/// - At most `max_peers_per_ip` entries may share one IP address.
/// - [`get_random_peer`](Self::get_random_peer) draws from a
///   cryptographically strong source so samples cannot be predicted.
///
/// # Concurrency
///
/// Every operation takes the bucket's lock once for its scan or mutation.
/// Peer-level logic (freshness updates, entropy reads) runs outside the lock.
#[derive(Debug)]
pub struct KBucket {
    inner: Mutex<BucketInner>,
    config: KBucketConfig,
    entropy: Arc<dyn EntropySource>,
}

impl KBucket {
    /// Create a new empty bucket with default limits and OS entropy
    pub fn new() -> Self {
        Self::build(KBucketConfig::default(), Arc::new(OsEntropySource::new()))
    }

    /// Create a new empty bucket with custom limits
    pub fn with_config(config: KBucketConfig) -> Result<Self, ConfigError> {
        Self::with_entropy(config, Arc::new(OsEntropySource::new()))
    }

    /// Create a new empty bucket with custom limits and entropy source
    pub fn with_entropy(
        config: KBucketConfig,
        entropy: Arc<dyn EntropySource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, entropy))
    }

    /// Create a new empty bucket with limits read from `provider`
    pub fn from_provider(provider: &dyn ConfigProvider) -> Result<Self, ConfigError> {
        Self::with_config(provider.kbucket_config())
    }

    fn build(config: KBucketConfig, entropy: Arc<dyn EntropySource>) -> Self {
        Self {
            inner: Mutex::new(BucketInner {
                peers: Vec::with_capacity(config.max_bucket_size),
                last_updated: Instant::now(),
            }),
            config,
            entropy,
        }
    }

    pub fn config(&self) -> &KBucketConfig {
        &self.config
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    /// Count the number of peers on this k-bucket
    pub fn count_peers(&self) -> usize {
        self.inner.lock().peers.len()
    }

    /// Count the number of peers that can be stored yet
    pub fn count_remaining_peers(&self) -> usize {
        self.config
            .max_bucket_size
            .saturating_sub(self.count_peers())
    }

    pub fn is_empty(&self) -> bool {
        self.count_peers() == 0
    }

    pub fn is_full(&self) -> bool {
        self.count_peers() == self.config.max_bucket_size
    }

    pub fn state(&self) -> BucketState {
        match self.count_peers() {
            0 => BucketState::Empty,
            n if n >= self.config.max_bucket_size => BucketState::Full,
            _ => BucketState::Partial,
        }
    }

    /// Number of stored peers sharing `ip`
    pub fn count_peers_for_ip(&self, ip: IpAddr) -> usize {
        self.inner
            .lock()
            .peers
            .iter()
            .filter(|peer| peer.ip() == ip)
            .count()
    }

    /// Instant of the last successful add, remove or recency move
    pub fn last_updated(&self) -> Instant {
        self.inner.lock().last_updated
    }

    // =========================================================================
    // Admission & storage
    // =========================================================================

    /// Check peer data and append to the end of the bucket if admissible
    ///
    /// Duplicate, capacity and per-IP checks all run against the counts
    /// before insertion under one lock acquisition, so concurrent adds can
    /// never overshoot either bound.
    pub fn add_peer(&self, peer: Arc<Peer>) -> Result<(), KBucketError> {
        let mut inner = self.inner.lock();

        let mut duplicate = false;
        let mut same_ip = 0;
        for existing in &inner.peers {
            if existing.id() == peer.id() {
                duplicate = true;
                break;
            }
            if existing.ip() == peer.ip() {
                same_ip += 1;
            }
        }

        if duplicate {
            drop(inner);
            debug!("[kad-router] Rejected duplicate peer {}", peer.id());
            return Err(KBucketError::DuplicatePeer(*peer.id()));
        }

        if inner.peers.len() >= self.config.max_bucket_size {
            drop(inner);
            debug!("[kad-router] Bucket full, rejected peer {}", peer.id());
            return Err(KBucketError::BucketFull {
                capacity: self.config.max_bucket_size,
            });
        }

        if same_ip >= self.config.max_peers_per_ip {
            drop(inner);
            warn!(
                "[kad-router] Per-IP limit reached for {}, rejected peer {}",
                peer.ip(),
                peer.id()
            );
            return Err(KBucketError::TooManyFromSameAddress {
                ip: peer.ip(),
                limit: self.config.max_peers_per_ip,
            });
        }

        inner.peers.push(Arc::clone(&peer));
        inner.last_updated = Instant::now();
        let count = inner.peers.len();
        drop(inner);

        debug!("[kad-router] Added peer {} ({} in bucket)", peer, count);
        Ok(())
    }

    /// Remove a peer from the bucket, preserving the order of the rest
    pub fn remove_peer(&self, peer: &Peer) -> Result<Arc<Peer>, KBucketError> {
        let mut inner = self.inner.lock();
        let position = inner
            .peers
            .iter()
            .position(|existing| existing.id() == peer.id())
            .ok_or(KBucketError::PeerNotFound)?;

        let removed = inner.peers.remove(position);
        inner.last_updated = Instant::now();
        drop(inner);

        debug!("[kad-router] Removed peer {}", removed);
        Ok(removed)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Get a peer by identifier
    pub fn get_peer(&self, id: &NodeId) -> Result<Arc<Peer>, KBucketError> {
        trace!("[kad-router] Looking up peer {}", id);
        self.inner
            .lock()
            .peers
            .iter()
            .find(|peer| peer.id() == id)
            .cloned()
            .ok_or(KBucketError::PeerNotFound)
    }

    /// Get a peer by the address a packet arrived from
    ///
    /// UDP addresses match the peer's UDP port, TCP addresses its TCP port.
    pub fn get_peer_by_addr(&self, addr: &NetworkAddr) -> Result<Arc<Peer>, KBucketError> {
        let (ip, port, is_tcp) = match addr {
            NetworkAddr::Udp(sock) => (sock.ip(), sock.port(), false),
            NetworkAddr::Tcp(sock) => (sock.ip(), sock.port(), true),
            other => return Err(KBucketError::UnsupportedAddressKind(other.kind())),
        };

        trace!("[kad-router] Looking up peer by {}", addr);
        self.inner
            .lock()
            .peers
            .iter()
            .find(|peer| {
                let peer_port = if is_tcp {
                    peer.tcp_port()
                } else {
                    peer.udp_port()
                };
                peer.ip() == ip && peer_port == port
            })
            .cloned()
            .ok_or(KBucketError::PeerNotFound)
    }

    /// Pick a peer uniformly at random
    ///
    /// Entropy is read before taking the lock. A 64-bit draw reduced modulo
    /// the bucket size has a bias below 2^-59 for any bucket this small.
    pub fn get_random_peer(&self) -> Result<Arc<Peer>, KBucketError> {
        let mut buf = [0u8; 8];
        self.entropy.fill(&mut buf)?;
        let draw = u64::from_be_bytes(buf);

        let inner = self.inner.lock();
        if inner.peers.is_empty() {
            return Err(KBucketError::EmptyBucket);
        }
        let index = (draw % inner.peers.len() as u64) as usize;
        Ok(Arc::clone(&inner.peers[index]))
    }

    /// Return the oldest peer in the bucket, if any
    pub fn oldest_peer(&self) -> Option<Arc<Peer>> {
        self.inner.lock().peers.first().cloned()
    }

    pub fn contains_peer(&self, id: &NodeId) -> bool {
        self.get_peer(id).is_ok()
    }

    /// Snapshot of the current peers, oldest first
    ///
    /// Later adds and removes do not affect the returned vector.
    pub fn peers(&self) -> Vec<Arc<Peer>> {
        self.inner.lock().peers.clone()
    }

    // =========================================================================
    // Distance ranking
    // =========================================================================

    /// Get the closest `max` verified, alive peers to `target`
    pub fn get_closest_peers(&self, target: &NodeId, max: usize) -> Vec<Arc<Peer>> {
        let snapshot = self.peers();
        if snapshot.is_empty() {
            return Vec::new();
        }
        find_closest(&snapshot, target, max)
    }

    // =========================================================================
    // Recency tracking
    // =========================================================================

    /// Record a successful contact and move the peer to the tail
    ///
    /// The peer's own freshness update runs without the bucket lock held.
    /// If the peer is removed concurrently between lookup and move, this
    /// returns `PeerNotFound`; callers can treat that as benign.
    pub fn set_peer_alive(&self, id: &NodeId) -> Result<(), KBucketError> {
        let peer = self.get_peer(id)?;
        peer.update_type();
        self.push_to_end(&peer)
    }

    /// Move an existing peer to the end of the bucket
    pub(super) fn push_to_end(&self, peer: &Peer) -> Result<(), KBucketError> {
        let mut inner = self.inner.lock();
        let position = inner
            .peers
            .iter()
            .position(|existing| existing.id() == peer.id());

        match position {
            Some(position) => {
                let moved = inner.peers.remove(position);
                inner.peers.push(moved);
                inner.last_updated = Instant::now();
                Ok(())
            }
            None => {
                drop(inner);
                debug!(
                    "[kad-router] Peer {} vanished before recency move",
                    peer.id()
                );
                Err(KBucketError::PeerNotFound)
            }
        }
    }
}

impl Default for KBucket {
    fn default() -> Self {
        Self::new()
    }
}
