use super::counter::RequestCounter;
use super::policy::{AlertPolicy, AlertState};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Fixed wall-clock interval between throughput evaluations.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// One evaluated sampling window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSample {
    pub count: u64,
    pub rate: f64,
    pub state: AlertState,
}

/// Drives periodic throughput evaluation over a shared [`RequestCounter`].
///
/// The recurring schedule runs as a cancellable background task; individual
/// ticks can also be driven manually, which is how the tests exercise it.
pub struct LoadSampler {
    counter: RequestCounter,
    policy: AlertPolicy,
    interval: Duration,
}

impl LoadSampler {
    pub fn new(counter: RequestCounter, policy: AlertPolicy) -> Self {
        Self {
            counter,
            policy,
            interval: SAMPLE_INTERVAL,
        }
    }

    /// Override the sampling interval. Tests use this to tick fast; the
    /// service itself runs at [`SAMPLE_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Classify one window. Returns `None` for a zero-width window, in which
    /// case the policy is not consulted at all.
    pub fn evaluate_window(&self, count: u64, elapsed: Duration) -> Option<LoadSample> {
        if elapsed.is_zero() {
            return None;
        }
        let rate = count as f64 / elapsed.as_secs_f64();
        Some(LoadSample {
            count,
            rate,
            state: self.policy.evaluate(rate),
        })
    }

    /// Run one sampling tick: read and reset the counter, classify the rate,
    /// and emit the alert side effect on a critical window.
    pub fn tick(&self) -> Option<LoadSample> {
        let window = self.counter.sample_and_reset();
        let sample = self.evaluate_window(window.count, window.elapsed);

        match sample {
            Some(sample) => {
                metrics::gauge!("request_rate").set(sample.rate);
                match sample.state {
                    AlertState::Critical => {
                        metrics::counter!("load_alerts_total").increment(1);
                        tracing::warn!(
                            rate = sample.rate,
                            threshold = self.policy.threshold(),
                            count = sample.count,
                            "High load detected"
                        );
                    }
                    AlertState::Normal => {
                        tracing::debug!(rate = sample.rate, count = sample.count, "Load sample");
                    }
                }
            }
            None => {
                tracing::debug!("Zero-width sampling window, skipping tick");
            }
        }

        sample
    }

    /// Start the recurring schedule. The task ticks until the returned
    /// handle is stopped; a slow tick is skipped, never queued.
    pub fn spawn(self) -> LoadSamplerHandle {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; consume it so
            // the first real sample covers a full window.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        self.tick();
                    }
                }
            }

            tracing::info!("Load sampler stopped");
        });

        LoadSamplerHandle { cancel, task }
    }
}

/// Lifecycle handle for a running sampler task.
pub struct LoadSamplerHandle {
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl LoadSamplerHandle {
    /// Stop the schedule and wait for the task to wind down. In-flight
    /// counter increments are unaffected; only future ticks are cancelled.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Load sampler task failed to shut down cleanly");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler() -> (RequestCounter, LoadSampler) {
        let counter = RequestCounter::new();
        (
            counter.clone(),
            LoadSampler::new(counter, AlertPolicy::default()),
        )
    }

    #[test]
    fn full_second_window_above_threshold_is_critical() {
        let (_, sampler) = sampler();
        let sample = sampler
            .evaluate_window(61, Duration::from_secs(1))
            .expect("window has nonzero width");

        assert_eq!(sample.rate, 61.0);
        assert_eq!(sample.state, AlertState::Critical);
    }

    #[test]
    fn requests_spread_over_two_seconds_stay_normal() {
        let (_, sampler) = sampler();
        let sample = sampler
            .evaluate_window(10, Duration::from_secs(2))
            .expect("window has nonzero width");

        assert_eq!(sample.rate, 5.0);
        assert_eq!(sample.state, AlertState::Normal);
    }

    #[test]
    fn zero_width_window_produces_no_evaluation() {
        let (_, sampler) = sampler();
        assert_eq!(sampler.evaluate_window(100, Duration::ZERO), None);
    }

    #[test]
    fn tick_drains_the_counter() {
        let (counter, sampler) = sampler();
        counter.increment();
        counter.increment();
        counter.increment();
        std::thread::sleep(Duration::from_millis(5));

        let sample = sampler.tick().expect("elapsed time is nonzero");
        assert_eq!(sample.count, 3);
        assert_eq!(sample.state, AlertState::Normal);

        // The tick reset the window; nothing is pending.
        assert_eq!(counter.sample_and_reset().count, 0);
    }

    #[tokio::test]
    async fn spawned_sampler_drains_counter_and_stops() {
        let counter = RequestCounter::new();
        let handle = LoadSampler::new(counter.clone(), AlertPolicy::default())
            .with_interval(Duration::from_millis(10))
            .spawn();

        for _ in 0..5 {
            counter.increment();
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop().await;

        // Everything recorded before the ticks has been sampled away.
        assert_eq!(counter.sample_and_reset().count, 0);
    }
}
