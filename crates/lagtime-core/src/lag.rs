//! Exponential lag filter with a 60 dB settling time.
//!
//! A one-pole smoother whose speed is given as the time a step response needs
//! to decay to 0.1% (-60 dB) of its initial error:
//!
//! ```text
//! coeff = exp(ln(0.001) / (lag * sample_rate))
//! y[n]  = (1 - coeff) * x[n] + coeff * y[n-1]
//!       = x[n] + coeff * (y[n-1] - x[n])
//! ```
//!
//! After `lag * sample_rate` samples the remaining error is `coeff^(lag * sr)
//! = 0.001` of where it started, independent of the sample rate.
//!
//! The coefficient and the output history are kept in `f64` and each sample is
//! emitted as `f32`. With a lag of several seconds `1 - coeff` is around 1e-6,
//! and in `f32` the per-sample correction `(1 - coeff) * error` rounds away
//! long before the error reaches -60 dB.
//!
//! Both inputs are [`ScalarSource`]s: fixed values set on the node, or the live
//! output of another node in the host graph, resolved once per sample.
//!
//! # Usage
//!
//! ```rust
//! use lagtime_core::{FrameContext, Lag, NodeId};
//!
//! // Glide toward whatever node 0 emits, settling within 50 ms
//! let mut lag = Lag::new(None, Some(0.05)).unwrap();
//! lag.connect_value(NodeId(0), 0);
//!
//! let knob = [1.0_f32];
//! let frames: [&[f32]; 1] = [&knob];
//! let ctx = FrameContext::new(48000.0, &frames).unwrap();
//!
//! let mut out = 0.0;
//! for _ in 0..2400 {
//!     out = lag.process_sample(&ctx);
//! }
//! assert!((out - 1.0).abs() <= 0.0011);
//! ```
//!
//! # Non-positive lag times
//!
//! Constant lag times are validated when they are set: zero, negative and
//! non-finite values are rejected with [`LagError::InvalidLagTime`]. A lag time
//! arriving from an upstream node cannot be rejected mid-stream, so at
//! processing time a non-positive or NaN `lag * sample_rate` yields
//! `coeff = 0` and the output snaps to the target. An infinite lag time yields
//! `coeff = 1` and the output holds.

use libm::exp;

use crate::context::ProcessContext;
use crate::error::LagError;
use crate::math::{LOG_001, flush_denormal};
use crate::node::{AudioNode, NodeId, PortInfo};
use crate::source::ScalarSource;

/// Target value used when none is given at construction.
pub const DEFAULT_VALUE: f32 = 0.0;

/// Lag time in seconds used when none is given at construction.
pub const DEFAULT_LAG_TIME: f32 = 1.0;

/// Per-sample decay coefficient for a 60 dB lag time.
///
/// Returns `exp(ln(0.001) / (lag_time * sample_rate))`, in `[0, 1]`.
/// A product `lag_time * sample_rate` that is not strictly positive (zero,
/// negative, NaN) returns `0.0`, meaning no smoothing.
///
/// ```rust
/// use lagtime_core::coefficient;
///
/// let c = coefficient(1.0, 44100.0);
/// assert!((c - 0.999_843_374).abs() < 1e-8);
/// assert_eq!(coefficient(0.0, 44100.0), 0.0);
/// ```
#[inline]
pub fn coefficient(lag_time: f32, sample_rate: f32) -> f64 {
    let samples = f64::from(lag_time) * f64::from(sample_rate);
    if samples > 0.0 {
        exp(LOG_001 / samples)
    } else {
        0.0
    }
}

/// Exponential lag (smoothing) node.
///
/// # Inputs
///
/// - 0 `value`: the target the output approaches
/// - 1 `lag`: 60 dB lag time in seconds
///
/// # Outputs
///
/// - 0 `out`: the lagged value
///
/// # Invariants
///
/// - `last_output` is the sample produced by the most recent step, or 0.0
///   before the first step and after [`reset`](Self::reset)
/// - Constant sources always hold a finite value, and a constant lag time is
///   always `> 0`
/// - The output of a step always lies between the previous output and the
///   target, so a step change never overshoots
#[derive(Debug, Clone)]
pub struct Lag {
    /// Input 0: target value
    value: ScalarSource,
    /// Input 1: lag time in seconds
    lag: ScalarSource,
    /// Constant restored when input 0 is disconnected
    value_fallback: f32,
    /// Constant restored when input 1 is disconnected
    lag_fallback: f32,
    /// Previous output sample, at full precision
    last_output: f64,
}

impl Lag {
    /// Type tag reported to graph tooling.
    pub const TYPE_TAG: &'static str = "Lag";

    /// Input slot descriptions, in slot order.
    pub const INPUTS: [PortInfo; 2] = [
        PortInfo {
            name: "value",
            unit: "",
            default: DEFAULT_VALUE,
        },
        PortInfo {
            name: "lag",
            unit: "s",
            default: DEFAULT_LAG_TIME,
        },
    ];

    /// Output slot descriptions, in slot order.
    pub const OUTPUTS: [PortInfo; 1] = [PortInfo {
        name: "out",
        unit: "",
        default: 0.0,
    }];

    /// Create a lag filter with constant inputs.
    ///
    /// # Arguments
    ///
    /// * `value` - Initial target (default [`DEFAULT_VALUE`])
    /// * `lag_time` - Initial 60 dB lag time in seconds (default [`DEFAULT_LAG_TIME`])
    ///
    /// # Errors
    ///
    /// [`LagError::NonFiniteValue`] or [`LagError::InvalidLagTime`] when a
    /// given value cannot be used.
    pub fn new(value: Option<f32>, lag_time: Option<f32>) -> Result<Self, LagError> {
        Self::with_sources(
            ScalarSource::Constant(value.unwrap_or(DEFAULT_VALUE)),
            ScalarSource::Constant(lag_time.unwrap_or(DEFAULT_LAG_TIME)),
        )
    }

    /// Create a lag filter with explicit input bindings.
    ///
    /// Constant sources are validated like [`set_value`](Self::set_value) and
    /// [`set_lag_time`](Self::set_lag_time). Upstream sources fall back to the
    /// defaults if later disconnected.
    pub fn with_sources(value: ScalarSource, lag: ScalarSource) -> Result<Self, LagError> {
        let value_fallback = match value {
            ScalarSource::Constant(v) => check(LagError::check_value(v))?,
            ScalarSource::Upstream { .. } => DEFAULT_VALUE,
        };
        let lag_fallback = match lag {
            ScalarSource::Constant(t) => check(LagError::check_lag_time(t))?,
            ScalarSource::Upstream { .. } => DEFAULT_LAG_TIME,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("lag_new: value={value:?} lag={lag:?}");

        Ok(Self {
            value,
            lag,
            value_fallback,
            lag_fallback,
            last_output: 0.0,
        })
    }

    /// Bind the target to a constant.
    ///
    /// # Errors
    ///
    /// [`LagError::NonFiniteValue`] for NaN or infinity; the binding is unchanged.
    pub fn set_value(&mut self, value: f32) -> Result<(), LagError> {
        let value = check(LagError::check_value(value))?;
        self.value = ScalarSource::Constant(value);
        self.value_fallback = value;
        Ok(())
    }

    /// Bind the lag time to a constant, in seconds.
    ///
    /// # Errors
    ///
    /// [`LagError::InvalidLagTime`] unless `lag_time` is finite and `> 0`;
    /// the binding is unchanged.
    pub fn set_lag_time(&mut self, lag_time: f32) -> Result<(), LagError> {
        let lag_time = check(LagError::check_lag_time(lag_time))?;
        self.lag = ScalarSource::Constant(lag_time);
        self.lag_fallback = lag_time;
        Ok(())
    }

    /// Set a constant target and jump the output straight to it.
    ///
    /// Useful for initialization, where gliding up from 0.0 is unwanted.
    pub fn set_immediate(&mut self, value: f32) -> Result<(), LagError> {
        self.set_value(value)?;
        self.last_output = f64::from(value);
        Ok(())
    }

    /// Drive the target from `output` of `node`.
    pub fn connect_value(&mut self, node: NodeId, output: usize) {
        #[cfg(feature = "tracing")]
        tracing::debug!("lag_connect: value <- {node}[{output}]");
        self.value = ScalarSource::upstream(node, output);
    }

    /// Drive the lag time from `output` of `node`.
    pub fn connect_lag(&mut self, node: NodeId, output: usize) {
        #[cfg(feature = "tracing")]
        tracing::debug!("lag_connect: lag <- {node}[{output}]");
        self.lag = ScalarSource::upstream(node, output);
    }

    /// Return the target to its last constant.
    pub fn disconnect_value(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("lag_disconnect: value <- {}", self.value_fallback);
        self.value = ScalarSource::Constant(self.value_fallback);
    }

    /// Return the lag time to its last constant.
    pub fn disconnect_lag(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("lag_disconnect: lag <- {}", self.lag_fallback);
        self.lag = ScalarSource::Constant(self.lag_fallback);
    }

    /// Current binding of the target input.
    #[inline]
    pub fn value_source(&self) -> ScalarSource {
        self.value
    }

    /// Current binding of the lag time input.
    #[inline]
    pub fn lag_source(&self) -> ScalarSource {
        self.lag
    }

    /// The most recently emitted sample.
    #[inline]
    pub fn last_output(&self) -> f32 {
        self.last_output as f32
    }

    /// Resolve both inputs against `ctx` and produce the next sample.
    ///
    /// Call once per output sample, from one thread at a time.
    #[inline]
    pub fn process_sample<C: ProcessContext + ?Sized>(&mut self, ctx: &C) -> f32 {
        let sample_rate = ctx.sample_rate();
        debug_assert!(
            sample_rate.is_finite() && sample_rate > 0.0,
            "host sample rate must be finite and > 0, got {sample_rate}"
        );
        let value = self.value.resolve(ctx);
        let lag_time = self.lag.resolve(ctx);
        self.tick(value, lag_time, sample_rate)
    }

    /// Advance one sample with already-resolved inputs.
    ///
    /// A non-finite `value`, or a coefficient of 1.0 (infinite lag), holds the
    /// previous output.
    #[inline]
    pub fn tick(&mut self, value: f32, lag_time: f32, sample_rate: f32) -> f32 {
        let coeff = coefficient(lag_time, sample_rate);
        if !value.is_finite() || coeff >= 1.0 {
            return self.last_output as f32;
        }
        let target = f64::from(value);
        // y[n] = x[n] + coeff * (y[n-1] - x[n]), flushing only the decaying error
        self.last_output = target + flush_denormal(coeff * (self.last_output - target));
        self.last_output as f32
    }

    /// Clear the output history to 0.0. Bindings are kept.
    pub fn reset(&mut self) {
        self.last_output = 0.0;
    }
}

impl Default for Lag {
    fn default() -> Self {
        Self {
            value: ScalarSource::Constant(DEFAULT_VALUE),
            lag: ScalarSource::Constant(DEFAULT_LAG_TIME),
            value_fallback: DEFAULT_VALUE,
            lag_fallback: DEFAULT_LAG_TIME,
            last_output: 0.0,
        }
    }
}

impl AudioNode for Lag {
    fn type_tag(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn input_count(&self) -> usize {
        Self::INPUTS.len()
    }

    fn output_count(&self) -> usize {
        Self::OUTPUTS.len()
    }

    fn generate(&mut self, ctx: &dyn ProcessContext, outputs: &mut [f32]) {
        debug_assert!(!outputs.is_empty(), "Lag needs one output slot");
        let sample = self.process_sample(ctx);
        if let Some(slot) = outputs.first_mut() {
            *slot = sample;
        }
    }

    fn reset(&mut self) {
        Lag::reset(self);
    }
}

impl core::fmt::Display for Lag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(Self::TYPE_TAG)
    }
}

/// Log a rejected parameter before handing the error back.
#[inline]
fn check(result: Result<f32, LagError>) -> Result<f32, LagError> {
    #[cfg(feature = "tracing")]
    {
        if let Err(err) = &result {
            tracing::warn!("lag_param_rejected: {err}");
        }
    }
    result
}
