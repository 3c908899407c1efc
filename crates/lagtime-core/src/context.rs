//! What the host graph supplies to a node for each processing step.

use crate::error::LagError;
use crate::node::NodeId;

/// Per-sample view of the host graph, as consumed by a node.
///
/// Implementations must report a finite sample rate greater than zero. Nodes
/// treat anything else as a host precondition violation.
pub trait ProcessContext {
    /// Current host sample rate in Hz.
    fn sample_rate(&self) -> f32;

    /// The current sample emitted on `output` of `node`.
    ///
    /// Returns `None` when the node or output does not exist in this frame.
    fn upstream_output(&self, node: NodeId, output: usize) -> Option<f32>;
}

/// A [`ProcessContext`] over borrowed per-node output frames.
///
/// `frames[n]` holds the current samples of node `NodeId(n)`, one per output
/// slot. Hosts that already lay their per-sample outputs out this way can pass
/// them straight through; tests use it to wire literal values into a node.
///
/// # Example
///
/// ```rust
/// use lagtime_core::{FrameContext, NodeId, ProcessContext};
///
/// let lfo = [0.25_f32];
/// let frames: [&[f32]; 1] = [&lfo];
/// let ctx = FrameContext::new(48000.0, &frames).unwrap();
///
/// assert_eq!(ctx.upstream_output(NodeId(0), 0), Some(0.25));
/// assert_eq!(ctx.upstream_output(NodeId(1), 0), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    sample_rate: f32,
    frames: &'a [&'a [f32]],
}

impl<'a> FrameContext<'a> {
    /// Create a context, rejecting sample rates the lag formula cannot use.
    pub fn new(sample_rate: f32, frames: &'a [&'a [f32]]) -> Result<Self, LagError> {
        let sample_rate = LagError::check_sample_rate(sample_rate)?;
        Ok(Self {
            sample_rate,
            frames,
        })
    }

    /// Replace the borrowed frames, keeping the sample rate.
    ///
    /// Hosts call this once per sample before driving their nodes.
    #[inline]
    pub fn with_frames(self, frames: &'a [&'a [f32]]) -> Self {
        Self {
            sample_rate: self.sample_rate,
            frames,
        }
    }
}

impl ProcessContext for FrameContext<'_> {
    #[inline]
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    #[inline]
    fn upstream_output(&self, node: NodeId, output: usize) -> Option<f32> {
        self.frames
            .get(node.index() as usize)
            .and_then(|frame| frame.get(output))
            .copied()
    }
}
