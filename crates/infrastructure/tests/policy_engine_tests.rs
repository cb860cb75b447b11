//! Integration tests for the policy engine wired to the real adapters
//!
//! Randomness is seeded and time is paused, so every run is deterministic.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::cast_precision_loss)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use application::FaultInjectionService;
use application::ports::{DelayScheduler, InvocationCounter};
use async_trait::async_trait;
use domain::value_objects::{
    BurstDuration, CascadeLevels, DelayRange, FailureProbability, FieldConstraint, FixedDelay,
};
use infrastructure::{AtomicInvocationCounter, SeededRandomSource, TokioDelayScheduler};

// ============================================================================
// Test Helpers
// ============================================================================

const ANY_DELAY: FieldConstraint<u64> = FieldConstraint::new("delay", 0, 600, 0);

/// Records requested delays and returns immediately
#[derive(Default)]
struct RecordingScheduler {
    delays: Mutex<Vec<Duration>>,
}

#[async_trait]
impl DelayScheduler for RecordingScheduler {
    async fn suspend(&self, delay: Duration) -> Duration {
        self.delays.lock().unwrap().push(delay);
        delay
    }
}

fn tokio_service(seed: u64) -> (FaultInjectionService, Arc<AtomicInvocationCounter>) {
    let counter = Arc::new(AtomicInvocationCounter::new());
    let service = FaultInjectionService::new(
        Arc::new(SeededRandomSource::new(seed)),
        Arc::new(TokioDelayScheduler::new()),
        Arc::clone(&counter) as Arc<dyn InvocationCounter>,
    );
    (service, counter)
}

fn recording_service(seed: u64) -> (FaultInjectionService, Arc<RecordingScheduler>) {
    let scheduler = Arc::new(RecordingScheduler::default());
    let service = FaultInjectionService::new(
        Arc::new(SeededRandomSource::new(seed)),
        Arc::clone(&scheduler) as Arc<dyn DelayScheduler>,
        Arc::new(AtomicInvocationCounter::new()),
    );
    (service, scheduler)
}

fn delay(secs: u64) -> FixedDelay {
    FixedDelay::new(secs, &ANY_DELAY).unwrap()
}

// ============================================================================
// Delay accuracy
// ============================================================================

#[tokio::test(start_paused = true)]
async fn fixed_delay_is_measured_on_the_clock() {
    let (service, _) = tokio_service(1);

    let outcome = service.fixed_delay(delay(3)).await;

    assert!(outcome.succeeded());
    assert!(outcome.delay_actual() >= Duration::from_secs(3));
    assert!(outcome.delay_actual() < Duration::from_millis(3_100));
}

#[tokio::test(start_paused = true)]
async fn timeout_trap_hangs_exactly_sixty_seconds() {
    let (service, _) = tokio_service(1);
    let start = tokio::time::Instant::now();

    let outcome = service.timeout_trap().await;

    assert!(outcome.succeeded());
    assert_eq!(outcome.delay_requested(), Duration::from_secs(60));
    assert!(outcome.delay_actual() >= Duration::from_secs(60));
    assert!(start.elapsed() < Duration::from_secs(61));
}

#[tokio::test]
async fn random_delay_stays_inside_range() {
    let (service, scheduler) = recording_service(7);
    let range = DelayRange::new(1.0, 10.0).unwrap();

    for _ in 0..500 {
        let outcome = service.random_delay(range).await;
        let secs = outcome.delay_requested().as_secs_f64();
        assert!((1.0..=10.0).contains(&secs), "delay out of range: {secs}");
    }
    assert_eq!(scheduler.delays.lock().unwrap().len(), 500);
}

#[tokio::test(start_paused = true)]
async fn cascade_levels_run_sequentially() {
    let (service, _) = tokio_service(11);
    let start = tokio::time::Instant::now();

    let trace = service.cascade(CascadeLevels::new(5).unwrap()).await;

    assert_eq!(trace.levels(), 5);
    let sum: Duration = trace
        .steps()
        .iter()
        .map(|s| s.outcome.delay_requested())
        .sum();
    assert_eq!(trace.total_delay(), sum);
    for step in trace.steps() {
        let secs = step.outcome.delay_requested().as_secs_f64();
        assert!((0.5..=2.0).contains(&secs));
    }
    let levels: Vec<u8> = trace.steps().iter().map(|s| s.level).collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    // sequential suspensions add up; parallel ones would not
    assert!(start.elapsed() >= trace.total_delay());
}

// ============================================================================
// Failure decisions
// ============================================================================

#[tokio::test]
async fn empirical_failure_rate_within_three_standard_errors() {
    const TRIALS: u32 = 10_000;
    const P: f64 = 0.3;

    let (service, _) = recording_service(2024);
    let probability = FailureProbability::new(P).unwrap();

    let mut failures = 0_u32;
    for _ in 0..TRIALS {
        if !service.probabilistic_failure(probability, delay(0)).await.succeeded() {
            failures += 1;
        }
    }

    let observed = f64::from(failures) / f64::from(TRIALS);
    let standard_error = (P * (1.0 - P) / f64::from(TRIALS)).sqrt();
    assert!(
        (observed - P).abs() <= 3.0 * standard_error,
        "observed {observed}, expected {P} +/- {}",
        3.0 * standard_error
    );
}

#[tokio::test]
async fn extreme_probabilities_are_absolute() {
    let (service, _) = recording_service(5);

    for _ in 0..1_000 {
        assert!(
            service
                .probabilistic_failure(FailureProbability::NEVER, delay(0))
                .await
                .succeeded()
        );
        assert!(
            !service
                .probabilistic_failure(FailureProbability::ALWAYS, delay(0))
                .await
                .succeeded()
        );
    }
}

#[tokio::test]
async fn burst_error_always_fails_with_retry_after() {
    let (service, scheduler) = recording_service(3);

    for secs in [1_u64, 30, 300] {
        let outcome = service.burst_error(BurstDuration::new(secs).unwrap()).await;
        assert!(!outcome.succeeded());
        let detail = outcome.error_detail().unwrap();
        assert_eq!(detail.retry_after.map(u64::from), Some(secs));
    }
    assert!(scheduler.delays.lock().unwrap().is_empty());
}

#[tokio::test]
async fn same_seed_same_decisions() {
    let (a, _) = recording_service(77);
    let (b, _) = recording_service(77);
    let p = FailureProbability::new(0.5).unwrap();

    for _ in 0..100 {
        assert_eq!(
            a.probabilistic_failure(p, delay(0)).await.succeeded(),
            b.probabilistic_failure(p, delay(0)).await.succeeded()
        );
    }
}

// ============================================================================
// Counter
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_invocations_are_all_counted() {
    const M: u64 = 200;

    let (service, counter) = tokio_service(9);
    let service = Arc::new(service);
    let before = counter.current();

    let handles: Vec<_> = (0..M)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                if i % 2 == 0 {
                    service.fixed_delay(delay(0)).await;
                } else {
                    service.burst_error(BurstDuration::default()).await;
                }
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(counter.current(), before + M);
    assert_eq!(service.counters().total_requests, before + M);
}

#[tokio::test(start_paused = true)]
async fn abandoned_invocation_is_still_counted() {
    let (service, counter) = tokio_service(4);

    let pending = service.timeout_trap();
    let _ = tokio::time::timeout(Duration::from_secs(1), pending).await;

    assert_eq!(counter.current(), 1);
}
