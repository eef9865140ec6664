use crate::{Blackboard, TickContext, WorldMut};

/// Decision logic ticked once per frame for one agent.
///
/// Effects go straight to the world (turn, move, fire); a policy has no return
/// value for the host to interpret.
pub trait Policy<W>: 'static
where
    W: WorldMut + 'static,
{
    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    );
}
