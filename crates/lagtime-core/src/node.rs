//! Node-facing interface between a host audio graph and its processors.
//!
//! The host owns the graph: it orders nodes topologically, allocates output
//! slots, and calls [`AudioNode::generate`] once per output sample on a single
//! audio thread. A node only sees the [`ProcessContext`] handed to it for that
//! sample, so it stores no reference back to the graph.

use crate::context::ProcessContext;

/// Identifier of a node in the host graph.
///
/// Used by [`ScalarSource::Upstream`](crate::ScalarSource::Upstream) to name
/// the node whose output feeds an input slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Static description of one input or output slot, for graph introspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortInfo {
    /// Stable short name (e.g. `"value"`).
    pub name: &'static str,
    /// Display unit, empty when unitless.
    pub unit: &'static str,
    /// Value the slot holds when nothing else is configured.
    pub default: f32,
}

/// A processing unit driven sample-by-sample by the host graph.
///
/// Object-safe so hosts can store `Box<dyn AudioNode + Send>`.
///
/// # Real-time Constraints
///
/// [`generate`](Self::generate) runs on the audio thread and must not
/// allocate, lock, block or perform I/O.
pub trait AudioNode {
    /// Short human-readable tag identifying the node kind (e.g. `"Lag"`).
    ///
    /// A label for diagnostics and graph visualization only.
    fn type_tag(&self) -> &'static str;

    /// Number of input slots.
    fn input_count(&self) -> usize;

    /// Number of output slots.
    fn output_count(&self) -> usize;

    /// Produce one sample for each output slot.
    ///
    /// `outputs` is the framework-owned slot array for this node, one entry
    /// per output; it must hold at least [`output_count`](Self::output_count)
    /// entries.
    fn generate(&mut self, ctx: &dyn ProcessContext, outputs: &mut [f32]);

    /// Clear internal state without touching parameters.
    fn reset(&mut self);
}
