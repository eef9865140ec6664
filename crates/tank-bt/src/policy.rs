use tank_core::{Blackboard, Policy, TickContext, WorldMut};

use crate::bt::{BtNode, BtStatus};
use crate::shape::NodeShape;

/// Tree root. Restarts the tree on the tick after it completes, so a tree of
/// single-frame actions runs again every frame.
pub struct BtPolicy<W>
where
    W: WorldMut + 'static,
{
    root: Box<dyn BtNode<W>>,
    last: BtStatus,
}

impl<W> BtPolicy<W>
where
    W: WorldMut + 'static,
{
    pub fn new(root: Box<dyn BtNode<W>>) -> Self {
        Self {
            root,
            last: BtStatus::Running,
        }
    }

    pub fn last_status(&self) -> BtStatus {
        self.last
    }

    pub fn shape(&self) -> NodeShape {
        self.root.shape()
    }
}

impl<W> Policy<W> for BtPolicy<W>
where
    W: WorldMut + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.last = self.root.tick(ctx, agent, world, blackboard);
        if self.last.is_done() {
            self.root.reset();
        }
    }
}
