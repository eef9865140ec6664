use core::fmt::Debug;

/// Stable identifier for a tank (or any other agent) known to the host.
///
/// `Ord` gives [`tick_brains`](crate::tick_brains) a stable update order, and
/// `stable_id` feeds the per-agent RNG streams so two runs with the same seed
/// fire the same random shots.
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        u64::from(self)
    }
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}
