//! Tank combat AI expressed as behaviour trees.
//!
//! A host implements [`TankWorldMut`] (transforms, target lookup and the three
//! effectors), picks a tree with [`build_behaviour`] and ticks it once per
//! frame through a [`tank_core::Brain`]. [`Arena`] and [`Simulation`] are a
//! headless host used by the CLI and the tests.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod arena;
pub mod behaviours;
pub mod config;
pub mod effector;
pub mod perception;
pub mod simulation;
pub mod transform;
pub mod world;

pub use arena::{Arena, TankControls, TankId, TankState};
pub use behaviours::{build_behaviour, BehaviourKind};
pub use config::{ArenaConfig, ConfigError, TankSpawn, TankTuning};
pub use effector::{Command, Effector, Signal};
pub use perception::{
    update_perception, Perception, TARGET_DISTANCE, TARGET_IN_FRONT, TARGET_OFF_CENTRE,
    TARGET_ON_RIGHT,
};
pub use simulation::{Simulation, SimulationReport, TankReport};
pub use transform::Transform;
pub use world::{TankWorldMut, TankWorldView};
