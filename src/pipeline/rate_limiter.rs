//! Request pacing and the batch-size check
//!
//! This module handles:
//! - Random pauses between consecutive requests
//! - Warning the operator before an unusually large batch
//! - The [`Confirmation`] seam used to ask for that confirmation

use crate::config::RateLimitConfig;
use rand::Rng;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::time::Duration;

/// Asks the operator a yes/no question
pub trait Confirmation {
    /// Returns true only on an explicit affirmative answer
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Interactive confirmation over a reader/writer pair
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Prompt<StdinLock<'static>, Stdout> {
    /// A prompt on the process's terminal
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirmation for Prompt<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{} [y/N] ", prompt)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&answer),
        }
    }
}

/// A fixed answer, for `--yes` and tests
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmation for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Paces requests with a random delay drawn from `[min_delay, max_delay]`
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_delay: Duration,
    max_delay: Duration,
    volume_threshold: usize,
    pauses: usize,
}

impl RateLimiter {
    /// Creates a limiter from validated configuration
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::from_parts(
            Duration::from_secs_f64(config.min_delay_secs),
            Duration::from_secs_f64(config.max_delay_secs),
            config.volume_threshold,
        )
    }

    /// Creates a limiter without the configuration floor on `min_delay`
    ///
    /// A `max_delay` below `min_delay` is raised to `min_delay`.
    pub fn from_parts(min_delay: Duration, max_delay: Duration, volume_threshold: usize) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            volume_threshold,
            pauses: 0,
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn volume_threshold(&self) -> usize {
        self.volume_threshold
    }

    /// Number of pauses taken so far
    pub fn pauses(&self) -> usize {
        self.pauses
    }

    /// Draws the next pause duration
    pub fn next_delay(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }

        let secs = rand::thread_rng()
            .gen_range(self.min_delay.as_secs_f64()..=self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs).clamp(self.min_delay, self.max_delay)
    }

    /// Sleeps for a random delay and returns how long it slept
    pub async fn pause(&mut self) -> Duration {
        let delay = self.next_delay();
        self.pauses += 1;
        tracing::debug!("Waiting {:.1}s before next request", delay.as_secs_f64());
        tokio::time::sleep(delay).await;
        delay
    }

    /// Rough run time in minutes for `count` URLs at the average delay
    pub fn estimated_minutes(&self, count: usize) -> f64 {
        let average = (self.min_delay.as_secs_f64() + self.max_delay.as_secs_f64()) / 2.0;
        count as f64 * average / 60.0
    }

    /// Returns true if a batch of `count` URLs may proceed
    ///
    /// Batches above the volume threshold need an explicit yes.
    pub fn check_volume(&self, count: usize, confirmation: &mut dyn Confirmation) -> bool {
        if count <= self.volume_threshold {
            return true;
        }

        tracing::warn!(
            "About to scrape {} URLs (recommended maximum: {}), estimated time {:.1} minutes",
            count,
            self.volume_threshold,
            self.estimated_minutes(count)
        );

        let prompt = format!(
            "Large batch: {} URLs exceeds the recommended maximum of {} and will take about {:.1} minutes. Continue?",
            count,
            self.volume_threshold,
            self.estimated_minutes(count)
        );

        confirmation.confirm(&prompt)
    }
}
