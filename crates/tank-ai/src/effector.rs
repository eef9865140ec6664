//! Effector commands: data describing one turn/move/fire request per tick.

use std::fmt;

use serde::{Deserialize, Serialize};
use tank_bt::{Action, BtNode};
use tank_core::{AgentId, DeterministicRng, TickContext};
use tank_tools::{emit as trace_emit, TraceEvent};

use crate::TankWorldMut;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effector {
    Turn,
    Move,
    Fire,
}

impl Effector {
    pub fn as_str(self) -> &'static str {
        match self {
            Effector::Turn => "Turn",
            Effector::Move => "Move",
            Effector::Fire => "Fire",
        }
    }

    pub fn trace_tag(self) -> &'static str {
        match self {
            Effector::Turn => "tank.turn",
            Effector::Move => "tank.move",
            Effector::Fire => "tank.fire",
        }
    }
}

/// Value fed to an effector, sampled every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    Constant(f32),
    /// `sin(time * frequency) + bias`, time in seconds.
    Sine { frequency: f64, bias: f32 },
    /// Uniform in `[0, 1)`, drawn from the agent's deterministic stream.
    Random,
}

impl Signal {
    pub fn sample<A: AgentId>(self, ctx: &TickContext, agent: A) -> f32 {
        match self {
            Signal::Constant(v) => v,
            Signal::Sine { frequency, bias } => (ctx.time_seconds * frequency).sin() as f32 + bias,
            Signal::Random => ctx.rng_for_agent(agent, ctx.tick).next_f32_unit(),
        }
    }
}

impl From<f32> for Signal {
    fn from(value: f32) -> Self {
        Signal::Constant(value)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Signal::Constant(v) => write!(f, "{v}"),
            Signal::Sine { frequency, bias } => {
                if frequency == 1.0 {
                    f.write_str("sin(t)")?;
                } else {
                    write!(f, "sin({frequency}t)")?;
                }
                if bias > 0.0 {
                    write!(f, " + {bias}")?;
                } else if bias < 0.0 {
                    write!(f, " - {}", -bias)?;
                }
                Ok(())
            }
            Signal::Random => f.write_str("random"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub effector: Effector,
    pub signal: Signal,
}

impl Command {
    pub fn turn(signal: impl Into<Signal>) -> Self {
        Self {
            effector: Effector::Turn,
            signal: signal.into(),
        }
    }

    pub fn drive(signal: impl Into<Signal>) -> Self {
        Self {
            effector: Effector::Move,
            signal: signal.into(),
        }
    }

    pub fn fire(signal: impl Into<Signal>) -> Self {
        Self {
            effector: Effector::Fire,
            signal: signal.into(),
        }
    }

    /// Sample the signal and hand the value to the host. Returns the value sent.
    pub fn apply<W>(self, ctx: &TickContext, agent: W::Agent, world: &mut W) -> f32
    where
        W: TankWorldMut,
    {
        let value = self.signal.sample(ctx, agent);
        match self.effector {
            Effector::Turn => world.turn(agent, value),
            Effector::Move => world.drive(agent, value),
            Effector::Fire => world.fire(agent, value),
        }
        value
    }

    /// Leaf node that applies this command every time it is ticked.
    pub fn node<W>(self) -> Box<dyn BtNode<W>>
    where
        W: TankWorldMut + 'static,
    {
        let label = self.to_string();
        Action::new(label.clone(), move |ctx: &TickContext, agent, world: &mut W, bb| {
            let value = self.apply(ctx, agent, world);
            trace_emit(
                bb,
                TraceEvent::new(ctx.tick, self.effector.trace_tag())
                    .with_detail(label.clone())
                    .with_value(f64::from(value)),
            );
        })
        .boxed()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.effector.as_str(), self.signal)
    }
}
