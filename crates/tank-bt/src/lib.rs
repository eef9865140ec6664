//! Behavior tree runtime built on `tank-core`.
//!
//! Trees are ticked once per frame by the host. Composites keep their running
//! child between frames; guard conditions decide, via [`Stops`], whether they
//! may abort their own subtree or a lower-priority sibling.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod policy;
pub mod shape;

pub use bt::{BtNode, BtStatus, Preempt};
pub use composite::{Selector, Sequence};
pub use decorator::{Condition, Operator, Service, Stops};
pub use leaf::{Action, Wait};
pub use policy::BtPolicy;
pub use shape::{NodeShape, NodeType};
