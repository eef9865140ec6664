#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use tank_core::{BbKey, Blackboard};

/// A decision-trace record.
///
/// `value` carries the one number worth plotting for the tag (a turn rate, a
/// preempted child index, a distance); `detail` names the node involved.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub detail: Cow<'static, str>,
    pub value: f64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            detail: Cow::Borrowed(""),
            value: 0.0,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Cow<'static, str>>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

/// In-memory collection of events.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::named(0x7A4C_7ACE_0000_0001, "traceLog");
/// Streaming into a host-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> =
    BbKey::named(0x7A4C_7ACE_0000_0002, "traceSink");

/// Record `event` in whichever of the trace keys are installed; a no-op otherwise.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
