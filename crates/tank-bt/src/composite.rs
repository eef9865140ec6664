use std::borrow::Cow;

use tank_core::{Blackboard, TickContext, WorldMut};
use tank_tools::{emit as trace_emit, TraceEvent};

use crate::bt::{BtNode, BtStatus, Preempt};
use crate::shape::{NodeShape, NodeType};

/// Runs children in order until one fails. Resumes a running child on the
/// next tick instead of starting over.
pub struct Sequence<W>
where
    W: WorldMut + 'static,
{
    name: Cow<'static, str>,
    children: Vec<Box<dyn BtNode<W>>>,
    index: usize,
}

impl<W> Sequence<W>
where
    W: WorldMut + 'static,
{
    pub fn new(children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self {
            name: Cow::Borrowed(""),
            children,
            index: 0,
        }
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn boxed(self) -> Box<dyn BtNode<W>> {
        Box::new(self)
    }
}

impl<W> BtNode<W> for Sequence<W>
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
        while self.index < self.children.len() {
            let status = self.children[self.index].tick(ctx, agent, world, blackboard);
            match status {
                BtStatus::Running => return BtStatus::Running,
                BtStatus::Failure => {
                    self.reset();
                    return BtStatus::Failure;
                }
                BtStatus::Success => self.index += 1,
            }
        }

        self.reset();
        BtStatus::Success
    }

    fn reset(&mut self) {
        self.index = 0;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }

    fn shape(&self) -> NodeShape {
        NodeShape::branch(
            NodeType::Sequence,
            self.name.clone(),
            self.children.iter().map(|c| c.shape()).collect(),
        )
    }
}

/// First-success-wins. While a child is running, higher-priority siblings are
/// polled through [`BtNode::preempts`] so guards can take over.
pub struct Selector<W>
where
    W: WorldMut + 'static,
{
    name: Cow<'static, str>,
    children: Vec<Box<dyn BtNode<W>>>,
    index: usize,
}

impl<W> Selector<W>
where
    W: WorldMut + 'static,
{
    pub fn new(children: Vec<Box<dyn BtNode<W>>>) -> Self {
        Self {
            name: Cow::Borrowed(""),
            children,
            index: 0,
        }
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn boxed(self) -> Box<dyn BtNode<W>> {
        Box::new(self)
    }

    /// Check guards above the running child. Returns `false` when the selector
    /// must fail this tick.
    fn poll_higher_priority(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        blackboard: &mut Blackboard,
    ) -> bool {
        let running = self.index;
        for i in 0..running {
            let Some(preempt) = self.children[i].preempts(ctx, agent, world, &*blackboard) else {
                continue;
            };

            self.children[running].reset();
            tracing::debug!(
                selector = %self.name,
                aborted = running,
                guard = i,
                ?preempt,
                "higher-priority branch took over"
            );
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.selector.preempt")
                    .with_detail(self.name.clone())
                    .with_value(i as f64),
            );

            return match preempt {
                Preempt::Restart => {
                    self.index = i;
                    true
                }
                Preempt::Abort => {
                    self.reset();
                    false
                }
            };
        }
        true
    }
}

impl<W> BtNode<W> for Selector<W>
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
        // A non-zero index only survives a tick that returned Running.
        if self.index > 0 && !self.poll_higher_priority(ctx, agent, &*world, blackboard) {
            return BtStatus::Failure;
        }

        while self.index < self.children.len() {
            let status = self.children[self.index].tick(ctx, agent, world, blackboard);
            match status {
                BtStatus::Running => return BtStatus::Running,
                BtStatus::Success => {
                    self.reset();
                    return BtStatus::Success;
                }
                BtStatus::Failure => self.index += 1,
            }
        }

        self.reset();
        BtStatus::Failure
    }

    fn reset(&mut self) {
        self.index = 0;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }

    fn shape(&self) -> NodeShape {
        NodeShape::branch(
            NodeType::Selector,
            self.name.clone(),
            self.children.iter().map(|c| c.shape()).collect(),
        )
    }
}
