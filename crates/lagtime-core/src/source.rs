//! Input binding: a node input is either a fixed value or wired upstream.

use crate::context::ProcessContext;
use crate::node::NodeId;

/// Where a node input takes its value from on each sample.
///
/// # Example
///
/// ```rust
/// use lagtime_core::{FrameContext, NodeId, ScalarSource};
///
/// let env = [0.75_f32];
/// let frames: [&[f32]; 1] = [&env];
/// let ctx = FrameContext::new(48000.0, &frames).unwrap();
///
/// assert_eq!(ScalarSource::Constant(2.0).resolve(&ctx), 2.0);
/// assert_eq!(ScalarSource::upstream(NodeId(0), 0).resolve(&ctx), 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarSource {
    /// A value fixed at configuration time.
    Constant(f32),
    /// The live output of another graph node.
    Upstream {
        /// Node producing the signal.
        node: NodeId,
        /// Output slot on that node.
        output: usize,
    },
}

impl ScalarSource {
    /// Bind to `output` of `node`.
    #[inline]
    pub fn upstream(node: NodeId, output: usize) -> Self {
        Self::Upstream { node, output }
    }

    /// The current scalar for this input.
    ///
    /// An upstream output the context cannot supply reads as silence (`0.0`).
    #[inline]
    pub fn resolve<C: ProcessContext + ?Sized>(&self, ctx: &C) -> f32 {
        match *self {
            Self::Constant(value) => value,
            Self::Upstream { node, output } => ctx.upstream_output(node, output).unwrap_or(0.0),
        }
    }

    /// Returns the constant, or `None` when wired upstream.
    #[inline]
    pub fn as_constant(&self) -> Option<f32> {
        match *self {
            Self::Constant(value) => Some(value),
            Self::Upstream { .. } => None,
        }
    }

    /// True when the input is driven by another node.
    #[inline]
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

impl From<f32> for ScalarSource {
    fn from(value: f32) -> Self {
        Self::Constant(value)
    }
}
