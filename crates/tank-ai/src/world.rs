use glam::Vec3;
use tank_core::{WorldMut, WorldView};

use crate::Transform;

pub trait TankWorldView: WorldView {
    fn transform(&self, agent: Self::Agent) -> Option<Transform>;

    /// World position of the tank `agent` is fighting, if there is one.
    fn target_position(&self, agent: Self::Agent) -> Option<Vec3>;
}

/// The three effectors. Values are requests for the current frame; their
/// physical meaning (speeds, launch force, reload) belongs to the host.
pub trait TankWorldMut: WorldMut + TankWorldView {
    /// Angular rate, conventionally in `[-1, 1]`; positive turns right.
    fn turn(&mut self, agent: Self::Agent, rate: f32);

    /// Linear rate, conventionally in `[-1, 1]`; positive drives forward.
    fn drive(&mut self, agent: Self::Agent, rate: f32);

    /// Request a shot. `0` asks for the host's fastest fire.
    fn fire(&mut self, agent: Self::Agent, velocity: f32);
}
