//! Outcome policy engine
//!
//! Decides, per invocation, how long to delay and whether to fail, then
//! executes the delay on the injected scheduler. Failures are returned as
//! typed [`Outcome`] values, never as errors.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use domain::value_objects::{
    BurstDuration, CascadeLevels, DelayRange, FailureProbability, FixedDelay,
};
use domain::{CascadeTrace, ErrorDetail, Outcome, Scenario, ServiceCounters};
use tracing::{debug, info, instrument, warn};

use crate::ports::{DelayScheduler, InvocationCounter, RandomSource};

/// Default hang of the timeout trap in seconds
pub const DEFAULT_TIMEOUT_TRAP_SECS: u64 = 60;

/// Server-side knobs of the policy engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicySettings {
    /// How long the timeout trap hangs
    pub timeout_trap: Duration,
    /// Range each cascade level draws its delay from
    pub cascade_step: DelayRange,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            timeout_trap: Duration::from_secs(DEFAULT_TIMEOUT_TRAP_SECS),
            cascade_step: DelayRange::CASCADE_STEP,
        }
    }
}

/// Fault-injection use cases, one method per scenario
pub struct FaultInjectionService {
    random: Arc<dyn RandomSource>,
    scheduler: Arc<dyn DelayScheduler>,
    counter: Arc<dyn InvocationCounter>,
    settings: PolicySettings,
}

impl std::fmt::Debug for FaultInjectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultInjectionService")
            .field("random", &"<RandomSource>")
            .field("scheduler", &"<DelayScheduler>")
            .field("invocations", &self.counter.current())
            .field("settings", &self.settings)
            .finish()
    }
}

impl FaultInjectionService {
    /// Create a service with default settings
    #[must_use]
    pub fn new(
        random: Arc<dyn RandomSource>,
        scheduler: Arc<dyn DelayScheduler>,
        counter: Arc<dyn InvocationCounter>,
    ) -> Self {
        Self {
            random,
            scheduler,
            counter,
            settings: PolicySettings::default(),
        }
    }

    /// Replace the server-side settings
    #[must_use]
    pub const fn with_settings(mut self, settings: PolicySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings
    pub const fn settings(&self) -> &PolicySettings {
        &self.settings
    }

    /// Snapshot of the invocation counter
    pub fn counters(&self) -> ServiceCounters {
        ServiceCounters::new(self.counter.current())
    }

    /// Count the invocation; called exactly once per operation, before any
    /// suspension, so abandoned requests are still counted
    fn begin(&self, scenario: Scenario) -> u64 {
        let invocation = self.counter.increment();
        debug!(%scenario, invocation, "Fault injection invoked");
        invocation
    }

    /// Wait exactly the requested number of seconds; never fails
    #[instrument(skip(self), fields(delay = %delay))]
    pub async fn fixed_delay(&self, delay: FixedDelay) -> Outcome {
        self.begin(Scenario::Slow);
        info!(delay_secs = delay.secs(), "Slow request received");

        let requested = delay.as_duration();
        let actual = self.scheduler.suspend(requested).await;
        Outcome::success(requested, actual, Utc::now())
    }

    /// Wait a uniformly drawn time inside `range`; never fails
    #[instrument(skip(self))]
    pub async fn random_delay(&self, range: DelayRange) -> Outcome {
        self.begin(Scenario::Random);

        let requested = range.sample(self.random.next_unit());
        info!(delay_secs = requested.as_secs_f64(), "Random delay request");
        let actual = self.scheduler.suspend(requested).await;
        Outcome::success(requested, actual, Utc::now())
    }

    /// Wait `delay`, then fail with probability `probability`
    ///
    /// The delay always runs first, so a failing call is exactly as slow as
    /// a succeeding one.
    #[instrument(skip(self), fields(failure_rate = %probability))]
    pub async fn probabilistic_failure(
        &self,
        probability: FailureProbability,
        delay: FixedDelay,
    ) -> Outcome {
        self.begin(Scenario::SometimesFail);
        info!(delay_secs = delay.secs(), "Sometimes-fail request");

        let requested = delay.as_duration();
        let actual = self.scheduler.suspend(requested).await;

        let draw = self.random.next_unit();
        if probability.decide(draw) {
            warn!(draw, "Request failed (simulated)");
            Outcome::failure(
                requested,
                actual,
                ErrorDetail::random_failure(probability),
                Utc::now(),
            )
        } else {
            Outcome::success(requested, actual, Utc::now())
        }
    }

    /// Hang for the configured trap duration; never fails and cannot be cut short
    #[instrument(skip(self))]
    pub async fn timeout_trap(&self) -> Outcome {
        self.begin(Scenario::TimeoutTrap);

        let requested = self.settings.timeout_trap;
        warn!(
            hang_secs = requested.as_secs_f64(),
            "Timeout trap triggered"
        );
        let actual = self.scheduler.suspend(requested).await;
        Outcome::success(requested, actual, Utc::now())
    }

    /// Fail immediately with a retry-after hint of `window`
    ///
    /// Stateless: every call fails on its own, no outage window is tracked
    /// across calls.
    #[instrument(skip(self))]
    pub async fn burst_error(&self, window: BurstDuration) -> Outcome {
        self.begin(Scenario::BurstError);
        warn!(
            retry_after = window.secs(),
            "Burst error mode - request rejected as unavailable"
        );

        Outcome::failure(
            Duration::ZERO,
            Duration::ZERO,
            ErrorDetail::service_unavailable(window),
            Utc::now(),
        )
    }

    /// Run `levels` random waits strictly one after another
    #[instrument(skip(self))]
    pub async fn cascade(&self, levels: CascadeLevels) -> CascadeTrace {
        self.begin(Scenario::Cascade);

        let mut trace = CascadeTrace::new();
        for level in 1..=levels.get() {
            let requested = self.settings.cascade_step.sample(self.random.next_unit());
            let actual = self.scheduler.suspend(requested).await;
            debug!(level, delay_secs = requested.as_secs_f64(), "Cascade level done");
            trace.push(Outcome::success(requested, actual, Utc::now()));
        }

        info!(
            levels = trace.levels(),
            total_delay_secs = trace.total_delay().as_secs_f64(),
            "Cascade completed"
        );
        trace
    }
}
