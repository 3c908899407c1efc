//! Error type for rejected lag filter configuration.
//!
//! All validation happens at the edges: constructing a [`Lag`](crate::Lag),
//! rebinding one of its inputs to a constant, or building a
//! [`FrameContext`](crate::FrameContext). The per-sample recurrence itself
//! cannot fail.

/// Errors reported when a lag filter or host context is configured with
/// values the coefficient formula cannot use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LagError {
    /// Lag time must be finite and strictly positive (seconds).
    InvalidLagTime(f32),
    /// Sample rate must be finite and strictly positive (Hz).
    InvalidSampleRate(f32),
    /// A constant target value must be finite.
    NonFiniteValue(f32),
}

impl LagError {
    /// Validate a constant lag time in seconds.
    pub fn check_lag_time(lag_time: f32) -> Result<f32, Self> {
        if lag_time.is_finite() && lag_time > 0.0 {
            Ok(lag_time)
        } else {
            Err(Self::InvalidLagTime(lag_time))
        }
    }

    /// Validate a host sample rate in Hz.
    pub fn check_sample_rate(sample_rate: f32) -> Result<f32, Self> {
        if sample_rate.is_finite() && sample_rate > 0.0 {
            Ok(sample_rate)
        } else {
            Err(Self::InvalidSampleRate(sample_rate))
        }
    }

    /// Validate a constant target value.
    pub fn check_value(value: f32) -> Result<f32, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFiniteValue(value))
        }
    }
}

impl core::fmt::Display for LagError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLagTime(t) => {
                write!(f, "lag time must be a finite number of seconds > 0, got {t}")
            }
            Self::InvalidSampleRate(sr) => {
                write!(f, "sample rate must be a finite number of Hz > 0, got {sr}")
            }
            Self::NonFiniteValue(v) => write!(f, "target value must be finite, got {v}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LagError {}
