//! Bounded-round retry coordination for bundle broadcast
//!
//! State machine: `Broadcasting -> Accepted` as soon as any relay accepts a
//! round, or `Broadcasting -> Exhausted` once the round ceiling is hit with
//! no acceptance. The blockhash captured at call start is used for every
//! round and deliberately not refreshed; if the validity window closes while
//! rounds run, the failure surfaces at confirmation time instead.

use std::time::Duration;

use tracing::{info, warn};

use crate::executor::broadcast::BundleRelay;

/// Default broadcast round ceiling.
pub const DEFAULT_MAX_ROUNDS: u32 = 5;

/// Terminal outcome of the broadcast phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastOutcome {
    /// At least one relay accepted the bundle; proceed to confirmation.
    Accepted {
        /// Zero-based round in which acceptance happened
        round: u32,
        /// How many endpoints accepted in that round
        accepted_endpoints: usize,
    },
    /// No relay accepted across the full round budget.
    Exhausted { rounds: u32 },
}

/// Repeats the fan-out broadcast until acceptance or round exhaustion.
#[derive(Debug, Clone)]
pub struct RetryCoordinator {
    max_rounds: u32,
    round_delay: Duration,
}

impl RetryCoordinator {
    /// `round_delay` of zero reproduces the base design of back-to-back
    /// rounds; a non-zero delay is applied between rounds only.
    pub fn new(max_rounds: u32, round_delay: Duration) -> Self {
        Self {
            max_rounds,
            round_delay,
        }
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Run fan-out rounds until one is accepted or the ceiling is reached.
    ///
    /// Acceptance short-circuits immediately; remaining rounds are never
    /// issued.
    pub async fn run<R: BundleRelay + ?Sized>(
        &self,
        relay: &R,
        bundle: &[String],
    ) -> BroadcastOutcome {
        for round in 0..self.max_rounds {
            let accepted_endpoints = relay.broadcast_round(bundle).await;
            if accepted_endpoints > 0 {
                info!(round, accepted_endpoints, "bundle accepted by relay");
                return BroadcastOutcome::Accepted {
                    round,
                    accepted_endpoints,
                };
            }
            warn!(round, "no relay accepted bundle");

            if round + 1 < self.max_rounds && !self.round_delay.is_zero() {
                tokio::time::sleep(self.round_delay).await;
            }
        }

        BroadcastOutcome::Exhausted {
            rounds: self.max_rounds,
        }
    }
}

impl Default for RetryCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS, Duration::ZERO)
    }
}
