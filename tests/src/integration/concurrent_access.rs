//! # Concurrent Access Tests
//!
//! One bucket shared by many threads, the way network handlers and
//! maintenance routines share it in a running node. Bounds must hold no matter
//! how admissions interleave.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::{Arc, Barrier};
    use std::thread;

    use kad_router::testing::{init_tracing, make_peer, make_peer_at};
    use kad_router::{KBucket, KBucketError, NodeId};

    const THREADS: usize = 8;

    #[test]
    fn test_concurrent_adds_never_exceed_capacity() {
        init_tracing();
        let bucket = Arc::new(KBucket::new());
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let bucket = Arc::clone(&bucket);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut added = 0usize;
                    for i in 0..8 {
                        let id = (t * 8 + i) as u8;
                        match bucket.add_peer(make_peer(id)) {
                            Ok(()) => added += 1,
                            Err(KBucketError::BucketFull { .. }) => {}
                            Err(other) => panic!("unexpected error: {other}"),
                        }
                    }
                    added
                })
            })
            .collect();

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(total, 16, "Exactly max_bucket_size admissions succeed");
        assert_eq!(bucket.count_peers(), 16);
        assert!(bucket.is_full());
    }

    #[test]
    fn test_concurrent_same_ip_adds_respect_limit() {
        let bucket = Arc::new(KBucket::new());
        let barrier = Arc::new(Barrier::new(THREADS));
        let shared = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let bucket = Arc::clone(&bucket);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    bucket
                        .add_peer(make_peer_at(t as u8, shared, 5000 + t as u16))
                        .is_ok()
                })
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(admitted, 3);
        assert_eq!(bucket.count_peers_for_ip(shared), 3);
    }

    #[test]
    fn test_concurrent_duplicate_adds_admit_once() {
        let bucket = Arc::new(KBucket::new());
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let bucket = Arc::clone(&bucket);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    bucket.add_peer(make_peer(42))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let ok = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(KBucketError::DuplicatePeer(_))))
            .count();

        assert_eq!(ok, 1);
        assert_eq!(duplicates, THREADS - 1);
        assert_eq!(bucket.count_peers(), 1);
    }

    #[test]
    fn test_mixed_operations_keep_invariants() {
        init_tracing();
        let bucket = Arc::new(KBucket::new());
        for i in 0..12 {
            bucket.add_peer(make_peer(i)).unwrap();
        }

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let bucket = Arc::clone(&bucket);
                thread::spawn(move || {
                    for round in 0..200usize {
                        let id = ((t * 7 + round) % 24) as u8;
                        match round % 5 {
                            0 => {
                                let _ = bucket.add_peer(make_peer(id));
                            }
                            1 => {
                                let _ = bucket.remove_peer(&make_peer(id));
                            }
                            2 => {
                                let _ = bucket.set_peer_alive(&NodeId::from_u128(id as u128));
                            }
                            3 => {
                                let closest = bucket.get_closest_peers(&NodeId::zero(), 4);
                                assert!(closest.len() <= 4);
                            }
                            _ => {
                                let _ = bucket.get_random_peer();
                                let _ = bucket.oldest_peer();
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let peers = bucket.peers();
        assert!(peers.len() <= 16);

        let unique: HashSet<_> = peers.iter().map(|p| *p.id()).collect();
        assert_eq!(unique.len(), peers.len(), "No duplicate identifiers");
    }

    #[test]
    fn test_set_peer_alive_races_with_removal() {
        let bucket = Arc::new(KBucket::new());
        let peer = make_peer(1);
        bucket.add_peer(Arc::clone(&peer)).unwrap();

        let toucher = {
            let bucket = Arc::clone(&bucket);
            let id = *peer.id();
            thread::spawn(move || {
                for _ in 0..1_000 {
                    match bucket.set_peer_alive(&id) {
                        Ok(()) | Err(KBucketError::PeerNotFound) => {}
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
            })
        };

        let churner = {
            let bucket = Arc::clone(&bucket);
            let peer = Arc::clone(&peer);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    let _ = bucket.remove_peer(&peer);
                    let _ = bucket.add_peer(Arc::clone(&peer));
                }
            })
        };

        toucher.join().unwrap();
        churner.join().unwrap();

        assert!(bucket.count_peers() <= 1);
    }
}
