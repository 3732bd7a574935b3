//! Abuse Guard Tests
//!
//! ## Test Scopes
//! - **Counting**: Threshold crossing and reset.
//! - **Window**: Expiry of idle clients and pruning of unrelated entries.
//! - **Isolation**: Fingerprints are tracked independently.
//! - **Concurrency**: No lost updates under simultaneous misses.

#[cfg(test)]
mod tests {
    use crate::guard::service::AbuseGuard;
    use crate::guard::types::{Fingerprint, GuardEntry, GuardSettings};
    use std::time::{Duration, Instant};

    fn client(addr: &str) -> Fingerprint {
        Fingerprint::new("Mozilla/5.0", addr)
    }

    // ============================================================
    // COUNTING TESTS
    // ============================================================

    #[tokio::test]
    async fn test_first_miss_creates_entry() {
        let guard = AbuseGuard::new(GuardSettings::default());
        let fp = client("10.0.0.1");

        assert!(!guard.record_miss_and_check(&fp).await);
        assert_eq!(guard.miss_count(&fp).await, Some(1));
    }

    #[tokio::test]
    async fn test_fourth_miss_triggers_fallback_and_resets() {
        let guard = AbuseGuard::new(GuardSettings::default());
        let fp = client("10.0.0.1");
        let t0 = Instant::now();

        assert!(!guard.record_miss_at(&fp, t0).await);
        assert!(!guard.record_miss_at(&fp, t0 + Duration::from_secs(1)).await);
        assert!(!guard.record_miss_at(&fp, t0 + Duration::from_secs(2)).await);
        assert!(guard.record_miss_at(&fp, t0 + Duration::from_secs(3)).await);

        // Evicted on the spot
        assert_eq!(guard.miss_count(&fp).await, None);

        // Fifth miss starts over
        assert!(!guard.record_miss_at(&fp, t0 + Duration::from_secs(4)).await);
        assert_eq!(guard.miss_count(&fp).await, Some(1));
    }

    #[tokio::test]
    async fn test_custom_threshold() {
        let guard = AbuseGuard::new(GuardSettings {
            window: Duration::from_secs(150),
            max_misses: 1,
        });
        let fp = client("10.0.0.1");

        assert!(!guard.record_miss_and_check(&fp).await);
        assert!(guard.record_miss_and_check(&fp).await);
    }

    // ============================================================
    // WINDOW TESTS
    // ============================================================

    #[tokio::test]
    async fn test_idle_client_restarts_count() {
        let guard = AbuseGuard::new(GuardSettings::default());
        let fp = client("10.0.0.1");
        let t0 = Instant::now();

        guard.record_miss_at(&fp, t0).await;
        guard.record_miss_at(&fp, t0 + Duration::from_secs(10)).await;
        guard.record_miss_at(&fp, t0 + Duration::from_secs(20)).await;
        assert_eq!(guard.miss_count(&fp).await, Some(3));

        // 150s of silence after the last miss
        let later = t0 + Duration::from_secs(20 + 150);
        assert!(!guard.record_miss_at(&fp, later).await);
        assert_eq!(guard.miss_count(&fp).await, Some(1));
    }

    #[tokio::test]
    async fn test_window_slides_with_each_miss() {
        let guard = AbuseGuard::new(GuardSettings::default());
        let fp = client("10.0.0.1");
        let t0 = Instant::now();

        // Four misses spread over 400s, each within 150s of the previous one
        assert!(!guard.record_miss_at(&fp, t0).await);
        assert!(!guard.record_miss_at(&fp, t0 + Duration::from_secs(140)).await);
        assert!(!guard.record_miss_at(&fp, t0 + Duration::from_secs(280)).await);
        assert!(guard.record_miss_at(&fp, t0 + Duration::from_secs(400)).await);
    }

    #[tokio::test]
    async fn test_expired_entries_of_other_clients_are_pruned() {
        let guard = AbuseGuard::new(GuardSettings::default());
        let t0 = Instant::now();

        guard.record_miss_at(&client("10.0.0.1"), t0).await;
        guard.record_miss_at(&client("10.0.0.2"), t0).await;
        assert_eq!(guard.tracked_clients().await, 2);

        guard
            .record_miss_at(&client("10.0.0.3"), t0 + Duration::from_secs(200))
            .await;
        assert_eq!(guard.tracked_clients().await, 1);
    }

    #[test]
    fn test_entry_expiry_boundary() {
        let t0 = Instant::now();
        let window = Duration::from_secs(150);
        let entry = GuardEntry {
            miss_count: 2,
            last_seen: t0,
        };

        assert!(!entry.is_expired(t0 + Duration::from_secs(149), window));
        assert!(entry.is_expired(t0 + window, window));
        assert!(!entry.is_expired(t0, window));
    }

    // ============================================================
    // ISOLATION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_fingerprints_are_independent() {
        let guard = AbuseGuard::new(GuardSettings::default());
        let a = client("10.0.0.1");
        let same_addr_other_agent = Fingerprint::new("curl/8.0", "10.0.0.1");

        for _ in 0..3 {
            guard.record_miss_and_check(&a).await;
        }
        assert!(!guard.record_miss_and_check(&same_addr_other_agent).await);
        assert_eq!(guard.miss_count(&a).await, Some(3));

        assert!(guard.record_miss_and_check(&a).await);
        assert_eq!(guard.miss_count(&same_addr_other_agent).await, Some(1));
    }

    #[test]
    fn test_fingerprint_equality() {
        assert_eq!(client("1.2.3.4"), client("1.2.3.4"));
        assert_ne!(client("1.2.3.4"), client("1.2.3.5"));
        assert_ne!(
            Fingerprint::new("a", "1.2.3.4"),
            Fingerprint::new("b", "1.2.3.4")
        );
    }

    // ============================================================
    // CONCURRENCY TESTS
    // ============================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_misses_are_not_lost() {
        let guard = AbuseGuard::new(GuardSettings {
            window: Duration::from_secs(150),
            max_misses: 1000,
        });
        let fp = client("10.0.0.1");

        let mut handles = Vec::new();
        for _ in 0..100 {
            let guard = guard.clone();
            let fp = fp.clone();
            handles.push(tokio::spawn(async move {
                guard.record_miss_and_check(&fp).await
            }));
        }
        for handle in handles {
            assert!(!handle.await.unwrap());
        }

        assert_eq!(guard.miss_count(&fp).await, Some(100));
        assert_eq!(guard.tracked_clients().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_misses_trigger_exact_number_of_fallbacks() {
        let guard = AbuseGuard::new(GuardSettings::default());
        let fp = client("10.0.0.1");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = guard.clone();
            let fp = fp.clone();
            handles.push(tokio::spawn(async move {
                guard.record_miss_and_check(&fp).await
            }));
        }

        let mut fallbacks = 0;
        for handle in handles {
            if handle.await.unwrap() {
                fallbacks += 1;
            }
        }

        // Misses 4 and 8 cross the threshold
        assert_eq!(fallbacks, 2);
        assert_eq!(guard.miss_count(&fp).await, None);
    }
}
