//! The tank behaviour trees and the reusable fragments they are built from.
//!
//! Fragments return fresh node instances, so the same fragment can appear in
//! several branches of one tree without sharing run state.

use serde::{Deserialize, Serialize};
use tank_bt::{BtNode, BtPolicy, Condition, Operator, Selector, Sequence, Service, Stops, Wait};
use tank_core::TickContext;

use crate::perception::{update_perception, TARGET_OFF_CENTRE, TARGET_ON_RIGHT};
use crate::{Command, Signal, TankWorldMut};

pub const TARGET_UNIT_INTERVAL_SECONDS: f64 = 0.1;
pub const TARGET_UNIT_TURN_RATE: f32 = 0.3;

pub const TRACK_INTERVAL_SECONDS: f64 = 0.2;
pub const TRACK_TURN_RATE: f32 = 0.2;
pub const TRACK_AIM_TOLERANCE: f32 = 0.1;
pub const TRACK_SETTLE_SECONDS: f64 = 2.0;

pub const UNPREDICTABLE_CYCLE_SECONDS: f64 = 20.0;
pub const IDLE_TURN_RATE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviourKind {
    Fun,
    Deadly,
    Frightened,
    Unpredictable,
}

impl BehaviourKind {
    pub const ALL: [BehaviourKind; 4] = [
        BehaviourKind::Fun,
        BehaviourKind::Deadly,
        BehaviourKind::Frightened,
        BehaviourKind::Unpredictable,
    ];

    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(BehaviourKind::Fun),
            1 => Some(BehaviourKind::Deadly),
            2 => Some(BehaviourKind::Frightened),
            3 => Some(BehaviourKind::Unpredictable),
            _ => None,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            BehaviourKind::Fun => 0,
            BehaviourKind::Deadly => 1,
            BehaviourKind::Frightened => 2,
            BehaviourKind::Unpredictable => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BehaviourKind::Fun => "Fun",
            BehaviourKind::Deadly => "Deadly",
            BehaviourKind::Frightened => "Frightened",
            BehaviourKind::Unpredictable => "Unpredictable",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BehaviourKind::Fun => "spin in place and shoot continuously",
            BehaviourKind::Deadly => "weave back and forth while shooting at full rate",
            BehaviourKind::Frightened => "back away from the target while tracking and shooting",
            BehaviourKind::Unpredictable => "cycle through the other behaviours on a 20 second clock",
        }
    }

    pub fn build<W>(self) -> BtPolicy<W>
    where
        W: TankWorldMut + 'static,
    {
        let root = match self {
            BehaviourKind::Fun => fire_and_turn(0.0),
            BehaviourKind::Deadly => deadly_fire_and_turn(),
            BehaviourKind::Frightened => retreat_and_fire(0.5),
            BehaviourKind::Unpredictable => unpredictable(),
        };
        BtPolicy::new(root)
    }
}

/// Tree for a configuration index; anything outside `0..=3` gets [`idle`].
pub fn build_behaviour<W>(index: i32) -> BtPolicy<W>
where
    W: TankWorldMut + 'static,
{
    match BehaviourKind::from_index(index) {
        Some(kind) => kind.build(),
        None => {
            tracing::debug!(index, "unknown behaviour index, falling back to idle turn");
            idle()
        }
    }
}

pub fn idle<W>() -> BtPolicy<W>
where
    W: TankWorldMut + 'static,
{
    BtPolicy::new(Command::turn(IDLE_TURN_RATE).node())
}

pub fn stop_turning<W>() -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Command::turn(0.0).node()
}

pub fn random_fire<W>() -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Command::fire(Signal::Random).node()
}

/// Turn right at `rate` when the target is on the right, otherwise left.
pub fn steer_toward_target<W>(rate: f32, stops: Stops) -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Selector::new(vec![
        Condition::on_blackboard(
            TARGET_ON_RIGHT,
            Operator::IsEqual,
            true,
            stops,
            Command::turn(rate).node(),
        )
        .boxed(),
        Command::turn(-rate).node(),
    ])
    .boxed()
}

/// Refresh perception and steer toward the target. Meant to be nested in
/// other action sequences.
pub fn target_unit<W>() -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Service::new(
        TARGET_UNIT_INTERVAL_SECONDS,
        update_perception::<W>,
        steer_toward_target(TARGET_UNIT_TURN_RATE, Stops::None),
    )
    .named("TargetUnit")
    .boxed()
}

/// Spin at full rate while firing.
pub fn fire_and_turn<W>(fire_velocity: f32) -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Sequence::new(vec![
        Command::turn(1.0).node(),
        Command::fire(fire_velocity).node(),
    ])
    .named("FireAndTurn")
    .boxed()
}

/// Weave on sine curves while firing at the fastest rate; the oscillation also
/// frees a tank that is stuck against a wall.
pub fn deadly_fire_and_turn<W>() -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Sequence::new(vec![
        Command::drive(Signal::Sine {
            frequency: 2.0,
            bias: 0.0,
        })
        .node(),
        Command::turn(Signal::Sine {
            frequency: 1.0,
            bias: 0.0,
        })
        .node(),
        Command::fire(0.0).node(),
    ])
    .named("DeadlyFireAndTurn")
    .boxed()
}

/// Mostly reverse (with some forward drift) while firing and tracking.
pub fn retreat_and_fire<W>(fire_velocity: f32) -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Sequence::new(vec![
        Command::drive(Signal::Sine {
            frequency: 1.0,
            bias: -0.6,
        })
        .node(),
        Command::fire(fire_velocity).node(),
        target_unit(),
    ])
    .named("RetreatAndFire")
    .boxed()
}

/// Charge at full speed while firing and tracking.
pub fn seek_and_fire<W>(fire_velocity: f32) -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Sequence::new(vec![
        Command::drive(1.0).node(),
        Command::fire(fire_velocity).node(),
        target_unit(),
    ])
    .named("SeekAndFire")
    .boxed()
}

/// Constant turn and fire.
pub fn spin<W>(turn: f32, shoot: f32) -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Sequence::new(vec![Command::turn(turn).node(), Command::fire(shoot).node()])
        .named("Spin")
        .boxed()
}

/// Turn toward the target; once it is nearly centred, stop, settle for two
/// seconds and take a randomly powered shot. Not wired into [`BehaviourKind`].
pub fn track<W>() -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    let aim_and_fire = Condition::on_blackboard(
        TARGET_OFF_CENTRE,
        Operator::IsSmallerOrEqual,
        TRACK_AIM_TOLERANCE,
        Stops::ImmediateRestart,
        Sequence::new(vec![
            stop_turning(),
            Wait::new(TRACK_SETTLE_SECONDS).boxed(),
            random_fire(),
        ])
        .boxed(),
    )
    .boxed();

    let turn_right = Condition::on_blackboard(
        TARGET_ON_RIGHT,
        Operator::IsEqual,
        true,
        Stops::ImmediateRestart,
        Command::turn(TRACK_TURN_RATE).node(),
    )
    .boxed();

    Service::new(
        TRACK_INTERVAL_SECONDS,
        update_perception::<W>,
        Selector::new(vec![
            aim_and_fire,
            turn_right,
            Command::turn(-TRACK_TURN_RATE).node(),
        ])
        .boxed(),
    )
    .named("Track")
    .boxed()
}

pub fn track_behaviour<W>() -> BtPolicy<W>
where
    W: TankWorldMut + 'static,
{
    BtPolicy::new(track())
}

fn cycle_seconds(ctx: &TickContext) -> f64 {
    ctx.time_seconds.rem_euclid(UNPREDICTABLE_CYCLE_SECONDS)
}

fn time_window<W>(
    label: &'static str,
    in_window: fn(f64) -> bool,
    child: Box<dyn BtNode<W>>,
) -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Condition::new(
        label,
        move |ctx, _agent, _world, _bb| in_window(cycle_seconds(ctx)),
        Stops::ImmediateRestart,
        child,
    )
    .boxed()
}

/// Time-sliced selector over `time % 20`.
///
/// Windows are tested in order: `< 4` FireAndTurn, `> 16` DeadlyFireAndTurn,
/// `> 10` RetreatAndFire, `> 5` SeekAndFire, else TargetUnit. Boundaries are
/// strict, so exactly 10 s and 16 s fall to the next lower window and
/// `[4, 5]` reaches the TargetUnit fallback.
pub fn unpredictable<W>() -> Box<dyn BtNode<W>>
where
    W: TankWorldMut + 'static,
{
    Selector::new(vec![
        time_window("time % 20 < 4", |t| t < 4.0, fire_and_turn(0.0)),
        time_window("time % 20 > 16", |t| t > 16.0, deadly_fire_and_turn()),
        time_window("time % 20 > 10", |t| t > 10.0, retreat_and_fire(0.5)),
        time_window("time % 20 > 5", |t| t > 5.0, seek_and_fire(0.2)),
        target_unit(),
    ])
    .named("Unpredictable")
    .boxed()
}
