//! Deterministic, engine-agnostic primitives shared by the tank AI crates.
//!
//! The host engine owns the world and the clock; this crate only describes how a
//! frame is presented to an agent ([`TickContext`]), where an agent keeps its
//! scratch state ([`Blackboard`]) and how a decision policy is driven ([`Brain`]).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod brain;
pub mod policy;
pub mod rng;
pub mod tick;
pub mod world;

pub use agent::AgentId;
pub use blackboard::{BbKey, Blackboard};
pub use brain::{tick_brains, Brain};
pub use policy::Policy;
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::{TickClock, TickContext};
pub use world::{WorldMut, WorldView};
