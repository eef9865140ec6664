use std::borrow::Cow;

use tank_core::{Blackboard, TickContext, WorldMut, WorldView};

use crate::bt::{BtNode, BtStatus};
use crate::shape::{NodeShape, NodeType};

type Effect<W> = Box<dyn FnMut(&TickContext, <W as WorldView>::Agent, &mut W, &mut Blackboard)>;

/// Single-frame side effect. Always succeeds.
pub struct Action<W>
where
    W: WorldMut + 'static,
{
    name: Cow<'static, str>,
    effect: Effect<W>,
}

impl<W> Action<W>
where
    W: WorldMut + 'static,
{
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        effect: impl FnMut(&TickContext, W::Agent, &mut W, &mut Blackboard) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            effect: Box::new(effect),
        }
    }

    pub fn boxed(self) -> Box<dyn BtNode<W>> {
        Box::new(self)
    }
}

impl<W> BtNode<W> for Action<W>
where
    W: WorldMut + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> BtStatus {
        (self.effect)(ctx, agent, world, blackboard);
        BtStatus::Success
    }

    fn reset(&mut self) {}

    fn shape(&self) -> NodeShape {
        NodeShape::leaf(NodeType::Action, self.name.clone())
    }
}

/// Running until `seconds` have passed since its first tick, then Success.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wait {
    seconds: f64,
    started_at: Option<f64>,
}

impl Wait {
    pub fn new(seconds: f64) -> Self {
        Self {
            seconds,
            started_at: None,
        }
    }

    pub fn boxed<W>(self) -> Box<dyn BtNode<W>>
    where
        W: WorldMut + 'static,
    {
        Box::new(self)
    }
}

impl<W> BtNode<W> for Wait
where
    W: WorldMut + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> BtStatus {
        let started = *self.started_at.get_or_insert(ctx.time_seconds);
        if ctx.time_seconds - started >= self.seconds {
            self.started_at = None;
            BtStatus::Success
        } else {
            BtStatus::Running
        }
    }

    fn reset(&mut self) {
        self.started_at = None;
    }

    fn shape(&self) -> NodeShape {
        NodeShape::leaf(NodeType::Wait, format!("{}s", self.seconds))
    }
}
