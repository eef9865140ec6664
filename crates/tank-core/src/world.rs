use crate::AgentId;

/// Read-only view of the host world.
///
/// The core crate does not prescribe any queries; the tank crate layers its
/// transform/target lookups on top as extension traits.
pub trait WorldView {
    type Agent: AgentId;
}

/// Effect sink: the host side that receives turn/move/fire requests.
pub trait WorldMut: WorldView {}
