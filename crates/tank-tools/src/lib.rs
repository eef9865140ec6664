//! Tooling primitives for inspecting tank AI decisions.
//!
//! Nodes emit small [`TraceEvent`]s into the agent's blackboard; hosts opt in by
//! installing a [`TraceLog`] or a [`TraceSink`] under the well-known keys.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{emit, TraceEvent, TraceLog, TraceSink, TRACE_LOG, TRACE_SINK};
