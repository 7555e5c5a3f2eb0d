//! # Eviction Flow Tests
//!
//! The bucket rejects newcomers when full. Replacement is driven by the
//! owning routing table:
//!
//! ```text
//! add_peer(new) ──BucketFull──→ oldest_peer() ──ping──→ alive?  ── yes ──→ set_peer_alive(oldest), drop new
//!                                                          │
//!                                                          no
//!                                                          ↓
//!                                           remove_peer(oldest), add_peer(new)
//! ```
//!
//! The ping is simulated by reading the peer's `alive` flag, which a transport
//! would clear after a timed-out probe.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kad_router::testing::make_peer;
    use kad_router::{KBucket, KBucketConfig, KBucketError, NodeId, Peer};

    /// Caller-side replacement policy built from bucket primitives.
    fn insert_or_challenge(bucket: &KBucket, candidate: Arc<Peer>) -> Result<bool, KBucketError> {
        match bucket.add_peer(Arc::clone(&candidate)) {
            Ok(()) => Ok(true),
            Err(KBucketError::BucketFull { .. }) => {
                let Some(oldest) = bucket.oldest_peer() else {
                    return bucket.add_peer(candidate).map(|()| true);
                };
                if oldest.is_alive() {
                    bucket.set_peer_alive(oldest.id())?;
                    Ok(false)
                } else {
                    bucket.remove_peer(&oldest)?;
                    bucket.add_peer(candidate).map(|()| true)
                }
            }
            Err(other) => Err(other),
        }
    }

    fn full_bucket() -> KBucket {
        let bucket = KBucket::with_config(KBucketConfig::for_testing()).unwrap();
        for i in 0..4 {
            bucket.add_peer(make_peer(i)).unwrap();
        }
        bucket
    }

    #[test]
    fn test_live_oldest_peer_is_kept() {
        let bucket = full_bucket();

        let inserted = insert_or_challenge(&bucket, make_peer(100)).unwrap();

        assert!(!inserted, "Stable peer retained");
        assert!(!bucket.contains_peer(&NodeId::from_u128(100)));
        assert!(bucket.contains_peer(&NodeId::from_u128(0)));
        // Challenged peer answered, so it moved to the tail
        assert_eq!(bucket.oldest_peer().unwrap().id(), &NodeId::from_u128(1));
    }

    #[test]
    fn test_dead_oldest_peer_is_replaced() {
        let bucket = full_bucket();
        bucket.oldest_peer().unwrap().set_alive(false);

        let inserted = insert_or_challenge(&bucket, make_peer(100)).unwrap();

        assert!(inserted);
        assert!(!bucket.contains_peer(&NodeId::from_u128(0)));
        assert!(bucket.contains_peer(&NodeId::from_u128(100)));
        assert_eq!(bucket.count_peers(), 4);
        assert_eq!(
            bucket.peers().last().unwrap().id(),
            &NodeId::from_u128(100),
            "Replacement enters at the tail"
        );
    }

    #[test]
    fn test_flood_of_new_identities_cannot_flush_live_peers() {
        let bucket = full_bucket();
        let original: Vec<_> = bucket.peers().iter().map(|p| *p.id()).collect();

        for i in 100..140 {
            insert_or_challenge(&bucket, make_peer(i)).unwrap();
        }

        let mut remaining: Vec<_> = bucket.peers().iter().map(|p| *p.id()).collect();
        remaining.sort();
        assert_eq!(remaining, original);
    }

    #[test]
    fn test_refreshed_peer_is_not_next_eviction_candidate() {
        let bucket = full_bucket();

        bucket.set_peer_alive(&NodeId::from_u128(0)).unwrap();
        bucket.oldest_peer().unwrap().set_alive(false);

        insert_or_challenge(&bucket, make_peer(100)).unwrap();

        assert!(bucket.contains_peer(&NodeId::from_u128(0)));
        assert!(!bucket.contains_peer(&NodeId::from_u128(1)));
    }
}
