//! Admission control behavior under a controlled clock.

use std::sync::Arc;
use std::time::Duration;

use gatehouse::admission::ClientRegistry;
use gatehouse::config::AdmissionConfig;

fn config(rps: f64, burst: u32) -> AdmissionConfig {
    AdmissionConfig {
        enabled: true,
        requests_per_second: rps,
        burst_size: burst,
        sweep_interval_secs: 60,
    }
}

#[tokio::test(start_paused = true)]
async fn burst_is_admitted_then_denied() {
    let registry = ClientRegistry::new(config(2.0, 5));

    for i in 0..5 {
        assert!(registry.admit("10.0.0.1"), "request {i} within burst");
    }
    assert!(!registry.admit("10.0.0.1"), "burst exhausted");
}

#[tokio::test(start_paused = true)]
async fn one_slot_returns_after_the_refill_interval() {
    let registry = ClientRegistry::new(config(2.0, 5));

    for _ in 0..5 {
        assert!(registry.admit("10.0.0.1"));
    }
    assert!(!registry.admit("10.0.0.1"));

    // 1/rate seconds buys back exactly one token.
    tokio::time::advance(Duration::from_millis(500)).await;
    assert!(registry.admit("10.0.0.1"));
    assert!(!registry.admit("10.0.0.1"));
}

#[tokio::test(start_paused = true)]
async fn idle_client_is_swept_and_restarts_with_a_full_bucket() {
    let registry = ClientRegistry::new(config(0.001, 2));

    assert!(registry.admit("10.0.0.1"));
    assert!(registry.admit("10.0.0.1"));
    assert!(!registry.admit("10.0.0.1"));
    assert_eq!(registry.client_count(), 1);

    // Idle past the threshold (three sweep intervals).
    tokio::time::advance(Duration::from_secs(181)).await;
    assert_eq!(registry.sweep(), 1);
    assert_eq!(registry.client_count(), 0);

    // The next request gets a fresh full bucket, not the depleted one.
    assert!(registry.admit("10.0.0.1"));
    assert!(registry.admit("10.0.0.1"));
}

#[tokio::test(start_paused = true)]
async fn throttled_but_active_client_is_not_swept() {
    let registry = ClientRegistry::new(config(0.001, 1));

    assert!(registry.admit("10.0.0.1"));

    // Keep hammering while throttled; each denial still refreshes last_seen.
    for _ in 0..4 {
        tokio::time::advance(Duration::from_secs(50)).await;
        assert!(!registry.admit("10.0.0.1"));
    }

    assert_eq!(registry.sweep(), 0);
    assert_eq!(registry.client_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn sweeper_task_evicts_on_its_interval() {
    let registry = Arc::new(ClientRegistry::new(config(0.001, 1)));
    let sweeper = Arc::clone(&registry).spawn_sweeper();

    assert!(registry.admit("10.0.0.1"));
    assert_eq!(registry.client_count(), 1);

    // Step past several sweep ticks; once idle exceeds the threshold the
    // ticking sweeper drops the client without any call from us.
    for _ in 0..5 {
        tokio::time::advance(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;
    }
    assert_eq!(registry.client_count(), 0);

    sweeper.stop().await;
}
