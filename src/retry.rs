//! Exponential backoff between download attempts
//!
//! Each delay is the current interval scaled by a random factor in
//! `[1 - randomization_factor, 1 + randomization_factor]`. The interval then
//! grows by `multiplier`, up to `max_interval` when one is configured.

use rand::Rng;
use std::time::Duration;

use crate::config::RetryConfig;

/// Stateful delay generator for one retried operation
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    current: Duration,
    multiplier: f64,
    randomization_factor: f64,
    max_interval: Option<Duration>,
}

impl ExponentialBackoff {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            current: config.initial_interval(),
            multiplier: config.multiplier,
            randomization_factor: config.randomization_factor,
            max_interval: config.max_interval(),
        }
    }

    /// Return the next delay and advance the interval
    pub fn next_delay(&mut self) -> Duration {
        let delay = randomize(self.current, self.randomization_factor);

        let next = Duration::from_secs_f64(self.current.as_secs_f64() * self.multiplier);
        self.current = match self.max_interval {
            Some(max) => next.min(max),
            None => next,
        };

        delay
    }
}

fn randomize(interval: Duration, factor: f64) -> Duration {
    if factor <= 0.0 || interval.is_zero() {
        return interval;
    }
    let secs = interval.as_secs_f64();
    let delta = secs * factor;
    let mut rng = rand::thread_rng();
    Duration::from_secs_f64(rng.gen_range((secs - delta)..=(secs + delta)))
}
