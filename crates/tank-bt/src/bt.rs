use tank_core::{Blackboard, TickContext, WorldMut};

use crate::shape::NodeShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl BtStatus {
    pub fn is_done(self) -> bool {
        self != BtStatus::Running
    }
}

/// How a guard wants its parent composite to react when it takes over from a
/// running lower-priority sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preempt {
    /// Abort the running sibling and continue at the guard in the same tick.
    Restart,
    /// Abort the running sibling and fail the composite; the root restarts it.
    Abort,
}

pub trait BtNode<W>: 'static
where
    W: WorldMut + 'static,
{
    /// Advance the node by one frame. A node that returns `Success` or `Failure`
    /// has already cleared its own run state.
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> BtStatus;

    /// Abort the node and everything below it, discarding partial progress.
    fn reset(&mut self);

    /// Asked of higher-priority siblings while a lower-priority one is running.
    fn preempts(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &W,
        _blackboard: &Blackboard,
    ) -> Option<Preempt> {
        None
    }

    fn shape(&self) -> NodeShape;
}
