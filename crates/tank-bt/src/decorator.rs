use std::borrow::Cow;
use std::fmt::Debug;

use tank_core::{BbKey, Blackboard, TickContext, WorldMut, WorldView};
use tank_tools::{emit as trace_emit, TraceEvent};

use crate::bt::{BtNode, BtStatus, Preempt};
use crate::shape::{NodeShape, NodeType};

/// When a guard condition re-checks itself after it has started.
///
/// | Policy | aborts own subtree | aborts lower priority | restart at guard |
/// |---|---|---|---|
/// | `None` | | | |
/// | `Current` | yes | | |
/// | `LowerPriority` | | yes | |
/// | `Both` | yes | yes | |
/// | `ImmediateRestart` | yes | yes | yes |
/// | `LowerPriorityImmediateRestart` | | yes | yes |
///
/// Without "restart at guard" the parent selector fails once and is started
/// again from the top on the next root tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stops {
    #[default]
    None,
    Current,
    LowerPriority,
    Both,
    ImmediateRestart,
    LowerPriorityImmediateRestart,
}

impl Stops {
    pub fn aborts_self(self) -> bool {
        matches!(self, Stops::Current | Stops::Both | Stops::ImmediateRestart)
    }

    pub fn aborts_lower_priority(self) -> bool {
        matches!(
            self,
            Stops::LowerPriority
                | Stops::Both
                | Stops::ImmediateRestart
                | Stops::LowerPriorityImmediateRestart
        )
    }

    pub fn restarts_immediately(self) -> bool {
        matches!(
            self,
            Stops::ImmediateRestart | Stops::LowerPriorityImmediateRestart
        )
    }
}

/// Comparison applied by [`Condition::on_blackboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    IsSet,
    IsNotSet,
    IsEqual,
    IsNotEqual,
    IsGreaterOrEqual,
    IsGreater,
    IsSmallerOrEqual,
    IsSmaller,
    AlwaysTrue,
}

impl Operator {
    /// Unset keys only satisfy `IsNotSet` and `AlwaysTrue`.
    pub fn compare<T: PartialOrd>(self, actual: Option<&T>, expected: &T) -> bool {
        match (self, actual) {
            (Operator::AlwaysTrue, _) => true,
            (Operator::IsSet, value) => value.is_some(),
            (Operator::IsNotSet, value) => value.is_none(),
            (_, None) => false,
            (Operator::IsEqual, Some(v)) => v == expected,
            (Operator::IsNotEqual, Some(v)) => v != expected,
            (Operator::IsGreaterOrEqual, Some(v)) => v >= expected,
            (Operator::IsGreater, Some(v)) => v > expected,
            (Operator::IsSmallerOrEqual, Some(v)) => v <= expected,
            (Operator::IsSmaller, Some(v)) => v < expected,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::IsSet => "is set",
            Operator::IsNotSet => "is not set",
            Operator::IsEqual => "==",
            Operator::IsNotEqual => "!=",
            Operator::IsGreaterOrEqual => ">=",
            Operator::IsGreater => ">",
            Operator::IsSmallerOrEqual => "<=",
            Operator::IsSmaller => "<",
            Operator::AlwaysTrue => "always",
        }
    }
}

type Predicate<W> =
    Box<dyn FnMut(&TickContext, <W as WorldView>::Agent, &W, &Blackboard) -> bool>;

/// Gate a subtree on a predicate.
///
/// The predicate is evaluated when the node starts; [`Stops`] decides whether
/// it is re-evaluated afterwards.
pub struct Condition<W>
where
    W: WorldMut + 'static,
{
    name: Cow<'static, str>,
    node_type: NodeType,
    predicate: Predicate<W>,
    stops: Stops,
    child: Box<dyn BtNode<W>>,
    active: bool,
    last: Option<bool>,
}

impl<W> Condition<W>
where
    W: WorldMut + 'static,
{
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        predicate: impl FnMut(&TickContext, W::Agent, &W, &Blackboard) -> bool + 'static,
        stops: Stops,
        child: Box<dyn BtNode<W>>,
    ) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::Condition,
            predicate: Box::new(predicate),
            stops,
            child,
            active: false,
            last: None,
        }
    }

    /// Compare a blackboard entry against a constant, e.g. `targetOffCentre <= 0.1`.
    pub fn on_blackboard<T>(
        key: BbKey<T>,
        op: Operator,
        value: T,
        stops: Stops,
        child: Box<dyn BtNode<W>>,
    ) -> Self
    where
        T: PartialOrd + Debug + 'static,
    {
        let name = match op {
            Operator::IsSet | Operator::IsNotSet | Operator::AlwaysTrue => {
                format!("{} {}", key.name(), op.symbol())
            }
            _ => format!("{} {} {:?}", key.name(), op.symbol(), value),
        };
        let mut cond = Self::new(
            name,
            move |_ctx, _agent, _world, bb| op.compare(bb.get(key), &value),
            stops,
            child,
        );
        cond.node_type = NodeType::BlackboardCondition;
        cond
    }

    pub fn boxed(self) -> Box<dyn BtNode<W>> {
        Box::new(self)
    }

    pub fn stops(&self) -> Stops {
        self.stops
    }

    fn evaluate(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        blackboard: &Blackboard,
    ) -> bool {
        let holds = (self.predicate)(ctx, agent, world, blackboard);
        self.last = Some(holds);
        holds
    }
}

impl<W> BtNode<W> for Condition<W>
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
        if !self.active {
            if !self.evaluate(ctx, agent, &*world, &*blackboard) {
                return BtStatus::Failure;
            }
            self.active = true;
        } else if self.stops.aborts_self() && !self.evaluate(ctx, agent, &*world, &*blackboard) {
            self.child.reset();
            self.active = false;
            tracing::debug!(condition = %self.name, "condition no longer holds, aborting subtree");
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.condition.abort").with_detail(self.name.clone()),
            );
            return BtStatus::Failure;
        }

        let status = self.child.tick(ctx, agent, world, blackboard);
        if status.is_done() {
            self.active = false;
        }
        status
    }

    fn reset(&mut self) {
        self.active = false;
        self.last = None;
        self.child.reset();
    }

    fn preempts(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        blackboard: &Blackboard,
    ) -> Option<Preempt> {
        if !self.stops.aborts_lower_priority() {
            return None;
        }

        // Only a false -> true transition counts; a guard whose own child
        // already failed must not keep stealing the frame.
        let previous = self.last;
        if !self.evaluate(ctx, agent, world, blackboard) || previous == Some(true) {
            return None;
        }

        Some(if self.stops.restarts_immediately() {
            Preempt::Restart
        } else {
            Preempt::Abort
        })
    }

    fn shape(&self) -> NodeShape {
        NodeShape::branch(self.node_type, self.name.clone(), vec![self.child.shape()])
    }
}

type ServiceFn<W> = Box<dyn FnMut(&TickContext, <W as WorldView>::Agent, &W, &mut Blackboard)>;

/// Runs a callback alongside a subtree: once when the service starts and again
/// every `interval_seconds` for as long as the subtree keeps running.
///
/// The timer is dropped when the subtree completes, so a subtree that finishes
/// every frame gets the callback every frame.
pub struct Service<W>
where
    W: WorldMut + 'static,
{
    name: Cow<'static, str>,
    interval_seconds: f64,
    callback: ServiceFn<W>,
    child: Box<dyn BtNode<W>>,
    next_due: Option<f64>,
}

impl<W> Service<W>
where
    W: WorldMut + 'static,
{
    pub fn new(
        interval_seconds: f64,
        callback: impl FnMut(&TickContext, W::Agent, &W, &mut Blackboard) + 'static,
        child: Box<dyn BtNode<W>>,
    ) -> Self {
        Self {
            name: Cow::Borrowed(""),
            interval_seconds: interval_seconds.max(0.0),
            callback: Box::new(callback),
            child,
            next_due: None,
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

impl<W> BtNode<W> for Service<W>
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
        let now = ctx.time_seconds;
        let due = self.next_due.map_or(true, |at| now >= at);
        if due {
            (self.callback)(ctx, agent, &*world, blackboard);
            tracing::trace!(service = %self.name, time = now, "service callback");
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.service.run")
                    .with_detail(self.name.clone())
                    .with_value(now),
            );
            // Keep the cadence anchored to the schedule unless we fell behind.
            self.next_due = Some(match self.next_due {
                Some(at) if at + self.interval_seconds > now => at + self.interval_seconds,
                _ => now + self.interval_seconds,
            });
        }

        let status = self.child.tick(ctx, agent, world, blackboard);
        if status.is_done() {
            self.next_due = None;
        }
        status
    }

    fn reset(&mut self) {
        self.next_due = None;
        self.child.reset();
    }

    fn shape(&self) -> NodeShape {
        let name = if self.name.is_empty() {
            format!("every {}s", self.interval_seconds)
        } else {
            format!("{} every {}s", self.name, self.interval_seconds)
        };
        NodeShape::branch(NodeType::Service, name, vec![self.child.shape()])
    }
}
