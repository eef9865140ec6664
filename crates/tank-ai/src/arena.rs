//! Kinematic stand-in for a game engine: tanks move on the ground plane and
//! count shots, nothing collides.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use tank_core::{WorldMut, WorldView};

use crate::{TankTuning, TankWorldMut, TankWorldView, Transform};

pub type TankId = u32;

/// Effector inputs as last requested by the tank's brain.
///
/// `turn` and `movement` persist until overwritten; `fire` is consumed by the
/// next [`Arena::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TankControls {
    pub turn: f32,
    pub movement: f32,
    pub fire: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TankState {
    pub transform: Transform,
    pub controls: TankControls,
    pub reload_remaining: f32,
    pub shells_fired: u32,
    pub last_launch_force: Option<f32>,
    pub distance_travelled: f32,
}

impl TankState {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            controls: TankControls::default(),
            reload_remaining: 0.0,
            shells_fired: 0,
            last_launch_force: None,
            distance_travelled: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Arena {
    tuning: TankTuning,
    tanks: BTreeMap<TankId, TankState>,
}

impl Arena {
    pub fn new(tuning: TankTuning) -> Self {
        Self {
            tuning,
            tanks: BTreeMap::new(),
        }
    }

    /// Place a tank, replacing any tank already registered under `id`.
    pub fn spawn(&mut self, id: TankId, transform: Transform) {
        self.tanks.insert(id, TankState::new(transform));
    }

    pub fn despawn(&mut self, id: TankId) -> Option<TankState> {
        self.tanks.remove(&id)
    }

    pub fn tank(&self, id: TankId) -> Option<&TankState> {
        self.tanks.get(&id)
    }

    pub fn tanks(&self) -> impl Iterator<Item = (TankId, &TankState)> + '_ {
        self.tanks.iter().map(|(id, state)| (*id, state))
    }

    /// Closest other tank; ties go to the lower id.
    pub fn nearest_enemy(&self, id: TankId) -> Option<TankId> {
        let origin = self.tanks.get(&id)?.transform.translation;
        self.tanks
            .iter()
            .filter(|(other, _)| **other != id)
            .map(|(other, state)| (*other, state.transform.translation.distance_squared(origin)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(other, _)| other)
    }

    /// Integrate every tank's controls over `dt_seconds`.
    pub fn step(&mut self, dt_seconds: f32) {
        let tuning = self.tuning;
        for (id, tank) in self.tanks.iter_mut() {
            let turn = tank.controls.turn.clamp(-1.0, 1.0);
            let movement = tank.controls.movement.clamp(-1.0, 1.0);

            let yaw = turn * tuning.turn_speed_degrees.to_radians() * dt_seconds;
            tank.transform.rotation = (Quat::from_rotation_y(yaw) * tank.transform.rotation).normalize();

            let delta = tank.transform.forward() * movement * tuning.move_speed * dt_seconds;
            tank.transform.translation += delta;
            tank.distance_travelled += delta.length();

            tank.reload_remaining = (tank.reload_remaining - dt_seconds).max(0.0);
            if let Some(velocity) = tank.controls.fire.take() {
                if tank.reload_remaining <= 0.0 {
                    let force = tuning.min_launch_force
                        + velocity.clamp(0.0, 1.0)
                            * (tuning.max_launch_force - tuning.min_launch_force);
                    tank.shells_fired += 1;
                    tank.last_launch_force = Some(force);
                    tank.reload_remaining = tuning.reload_seconds;
                    tracing::trace!(tank = id, force, "shell fired");
                }
            }
        }
    }

    fn controls_mut(&mut self, id: TankId) -> Option<&mut TankControls> {
        self.tanks.get_mut(&id).map(|tank| &mut tank.controls)
    }
}

impl WorldView for Arena {
    type Agent = TankId;
}

impl WorldMut for Arena {}

impl TankWorldView for Arena {
    fn transform(&self, agent: TankId) -> Option<Transform> {
        self.tanks.get(&agent).map(|tank| tank.transform)
    }

    fn target_position(&self, agent: TankId) -> Option<Vec3> {
        let target = self.nearest_enemy(agent)?;
        self.tanks.get(&target).map(|tank| tank.transform.translation)
    }
}

impl TankWorldMut for Arena {
    fn turn(&mut self, agent: TankId, rate: f32) {
        if let Some(controls) = self.controls_mut(agent) {
            controls.turn = rate;
        }
    }

    fn drive(&mut self, agent: TankId, rate: f32) {
        if let Some(controls) = self.controls_mut(agent) {
            controls.movement = rate;
        }
    }

    fn fire(&mut self, agent: TankId, velocity: f32) {
        if let Some(controls) = self.controls_mut(agent) {
            controls.fire = Some(velocity);
        }
    }
}
