#![allow(dead_code)]

use glam::Vec3;
use tank_ai::{Effector, TankWorldMut, TankWorldView, Transform};
use tank_bt::{BtNode, BtPolicy};
use tank_core::{Blackboard, Policy, TickContext, WorldMut, WorldView};

pub const AGENT: u32 = 1;

/// One tank and an optional target, recording every effector call.
#[derive(Debug, Default)]
pub struct TestWorld {
    pub tank: Option<Transform>,
    pub target: Option<Vec3>,
    pub commands: Vec<(Effector, f32)>,
}

impl TestWorld {
    pub fn facing_forward_at_origin() -> Self {
        Self {
            tank: Some(Transform::IDENTITY),
            ..Self::default()
        }
    }
}

impl WorldView for TestWorld {
    type Agent = u32;
}

impl WorldMut for TestWorld {}

impl TankWorldView for TestWorld {
    fn transform(&self, _agent: u32) -> Option<Transform> {
        self.tank
    }

    fn target_position(&self, _agent: u32) -> Option<Vec3> {
        self.target
    }
}

impl TankWorldMut for TestWorld {
    fn turn(&mut self, _agent: u32, rate: f32) {
        self.commands.push((Effector::Turn, rate));
    }

    fn drive(&mut self, _agent: u32, rate: f32) {
        self.commands.push((Effector::Move, rate));
    }

    fn fire(&mut self, _agent: u32, velocity: f32) {
        self.commands.push((Effector::Fire, velocity));
    }
}

pub struct Harness {
    pub policy: BtPolicy<TestWorld>,
    pub world: TestWorld,
    pub blackboard: Blackboard,
    tick: u64,
}

impl Harness {
    pub fn new(policy: BtPolicy<TestWorld>) -> Self {
        Self {
            policy,
            world: TestWorld::facing_forward_at_origin(),
            blackboard: Blackboard::new(),
            tick: 0,
        }
    }

    pub fn with_root(root: Box<dyn BtNode<TestWorld>>) -> Self {
        Self::new(BtPolicy::new(root))
    }

    /// Tick once at `time_seconds` and return the effector calls it produced.
    pub fn frame(&mut self, time_seconds: f64) -> Vec<(Effector, f32)> {
        let ctx = TickContext::at(self.tick, time_seconds);
        self.tick += 1;
        self.world.commands.clear();
        self.policy
            .tick(&ctx, AGENT, &mut self.world, &mut self.blackboard);
        self.world.commands.clone()
    }
}

pub fn effectors(commands: &[(Effector, f32)]) -> Vec<Effector> {
    commands.iter().map(|(effector, _)| *effector).collect()
}

pub fn value_of(commands: &[(Effector, f32)], effector: Effector) -> Option<f32> {
    commands
        .iter()
        .find(|(e, _)| *e == effector)
        .map(|(_, value)| *value)
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
