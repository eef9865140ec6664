#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{rng, AgentId, SplitMix64};

/// Everything an agent may know about the current frame.
///
/// `time_seconds` is the host's elapsed wall-clock time at the start of the
/// frame; time-sliced behaviours and timers (waits, services) read it instead of
/// accumulating `dt_seconds` themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub time_seconds: f64,
    pub seed: u64,
}

impl TickContext {
    /// Context for a single frame at an explicit time. Mostly useful in tests.
    pub fn at(tick: u64, time_seconds: f64) -> Self {
        Self {
            tick,
            dt_seconds: 0.0,
            time_seconds,
            seed: 0,
        }
    }

    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}

/// Fixed-step clock producing consecutive [`TickContext`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickClock {
    tick: u64,
    dt_seconds: f32,
    seed: u64,
}

impl TickClock {
    pub fn new(dt_seconds: f32, seed: u64) -> Self {
        Self {
            tick: 0,
            dt_seconds,
            seed,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn dt_seconds(&self) -> f32 {
        self.dt_seconds
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.tick as f64 * f64::from(self.dt_seconds)
    }

    /// Context for the current frame, then advance by one step.
    pub fn advance(&mut self) -> TickContext {
        let ctx = TickContext {
            tick: self.tick,
            dt_seconds: self.dt_seconds,
            time_seconds: self.elapsed_seconds(),
            seed: self.seed,
        };
        self.tick += 1;
        ctx
    }
}
