#![allow(dead_code)]

use tank_bt::{Action, BtNode, BtPolicy, Condition, Stops};
use tank_core::{BbKey, Blackboard, Policy, TickContext, WorldMut, WorldView};

pub const FLAG: BbKey<bool> = BbKey::named(1, "flag");
pub const COUNT: BbKey<u32> = BbKey::named(2, "count");

#[derive(Debug, Default)]
pub struct RecordingWorld {
    pub events: Vec<&'static str>,
}

impl WorldView for RecordingWorld {
    type Agent = u32;
}

impl WorldMut for RecordingWorld {}

pub fn mark(name: &'static str) -> Box<dyn BtNode<RecordingWorld>> {
    Action::new(name, move |_ctx, _agent, world: &mut RecordingWorld, _bb| {
        world.events.push(name)
    })
    .boxed()
}

pub fn never(child: Box<dyn BtNode<RecordingWorld>>) -> Box<dyn BtNode<RecordingWorld>> {
    Condition::new("never", |_ctx, _agent, _world, _bb| false, Stops::None, child).boxed()
}

pub struct Harness {
    pub policy: BtPolicy<RecordingWorld>,
    pub world: RecordingWorld,
    pub blackboard: Blackboard,
    tick: u64,
}

impl Harness {
    pub fn new(root: Box<dyn BtNode<RecordingWorld>>) -> Self {
        Self {
            policy: BtPolicy::new(root),
            world: RecordingWorld::default(),
            blackboard: Blackboard::new(),
            tick: 0,
        }
    }

    pub fn tick_at(&mut self, time_seconds: f64) {
        let ctx = TickContext::at(self.tick, time_seconds);
        self.tick += 1;
        self.policy
            .tick(&ctx, 1, &mut self.world, &mut self.blackboard);
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.world.events.clone()
    }
}
