//! Target geometry relative to the tank, published to the blackboard.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tank_core::{BbKey, Blackboard, TickContext};
use tank_tools::{emit as trace_emit, TraceEvent};

use crate::{TankWorldView, Transform};

pub const TARGET_DISTANCE: BbKey<f32> = BbKey::named(0x7A4E_0000_0001, "targetDistance");
pub const TARGET_IN_FRONT: BbKey<bool> = BbKey::named(0x7A4E_0000_0002, "targetInFront");
pub const TARGET_ON_RIGHT: BbKey<bool> = BbKey::named(0x7A4E_0000_0003, "targetOnRight");
pub const TARGET_OFF_CENTRE: BbKey<f32> = BbKey::named(0x7A4E_0000_0004, "targetOffCentre");

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perception {
    /// Distance to the target in the tank's local units.
    pub distance: f32,
    pub in_front: bool,
    pub on_right: bool,
    /// `|x|` of the unit heading to the target: 0 dead ahead or behind, 1 abeam.
    pub off_centre: f32,
}

impl Perception {
    /// Pure function of the tank's transform and the target position.
    ///
    /// A target exactly at the tank's origin has no heading: both flags are
    /// false and `off_centre` is 0.
    pub fn observe(agent: &Transform, target: Vec3) -> Self {
        let local = agent.inverse_transform_point(target);
        let heading = local.normalize_or_zero();
        Self {
            distance: local.length(),
            in_front: heading.z > 0.0,
            on_right: heading.x > 0.0,
            off_centre: heading.x.abs().min(1.0),
        }
    }

    pub fn publish(&self, blackboard: &mut Blackboard) {
        blackboard.set(TARGET_DISTANCE, self.distance);
        blackboard.set(TARGET_IN_FRONT, self.in_front);
        blackboard.set(TARGET_ON_RIGHT, self.on_right);
        blackboard.set(TARGET_OFF_CENTRE, self.off_centre);
    }

    /// The last published perception, if every key is present.
    pub fn read(blackboard: &Blackboard) -> Option<Self> {
        Some(Self {
            distance: blackboard.get_copied(TARGET_DISTANCE)?,
            in_front: blackboard.get_copied(TARGET_IN_FRONT)?,
            on_right: blackboard.get_copied(TARGET_ON_RIGHT)?,
            off_centre: blackboard.get_copied(TARGET_OFF_CENTRE)?,
        })
    }

    pub fn clear(blackboard: &mut Blackboard) {
        blackboard.remove(TARGET_DISTANCE);
        blackboard.remove(TARGET_IN_FRONT);
        blackboard.remove(TARGET_ON_RIGHT);
        blackboard.remove(TARGET_OFF_CENTRE);
    }
}

/// Service callback: recompute perception for `agent` and overwrite the keys.
///
/// Without a target (or without a transform for `agent`) the keys are removed,
/// so guards on them fail instead of acting on stale geometry.
pub fn update_perception<W>(ctx: &TickContext, agent: W::Agent, world: &W, blackboard: &mut Blackboard)
where
    W: TankWorldView,
{
    let observed = world
        .transform(agent)
        .zip(world.target_position(agent))
        .map(|(transform, target)| Perception::observe(&transform, target));

    match observed {
        Some(perception) => {
            perception.publish(blackboard);
            tracing::trace!(
                ?agent,
                distance = perception.distance,
                off_centre = perception.off_centre,
                on_right = perception.on_right,
                "perception updated"
            );
        }
        None => {
            Perception::clear(blackboard);
            tracing::debug!(?agent, "no target resolvable, perception cleared");
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "tank.perception.no_target"),
            );
        }
    }
}
