//! Frame delivery: the ordered [`sink::FrameSink`] contract and the
//! [`exporter`] driver that walks a scene through the timeline.

pub mod exporter;
pub mod sink;
