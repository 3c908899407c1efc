//! Lagtime Core - exponential lag filter for sample-by-sample audio graphs
//!
//! This crate provides a single-sample exponential smoothing filter, [`Lag`],
//! for parameter smoothing inside a modular audio graph. Given a target value
//! and a 60 dB settling time, the output approaches the target without
//! discontinuities, so abrupt control changes do not click.
//!
//! # Core Abstractions
//!
//! - [`Lag`] - The lag filter node (two inputs, one output)
//! - [`ScalarSource`] - An input bound either to a constant or to an upstream node output
//! - [`ProcessContext`] - What the host graph supplies per sample (sample rate, upstream outputs)
//! - [`FrameContext`] - Ready-made [`ProcessContext`] over borrowed per-node output frames
//! - [`AudioNode`] - Object-safe node interface the host graph drives
//!
//! # Example
//!
//! ```rust
//! use lagtime_core::{FrameContext, Lag};
//!
//! let ctx = FrameContext::new(44100.0, &[]).unwrap();
//!
//! // Target 1.0, reach within 0.1% (-60 dB) of it after 10 ms
//! let mut lag = Lag::new(Some(1.0), Some(0.01)).unwrap();
//!
//! let first = lag.process_sample(&ctx);
//! assert!(first > 0.0 && first < 1.0);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! lagtime-core = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to log construction and parameter rebinding.
//! Nothing is logged on the per-sample path.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod context;
pub mod error;
pub mod lag;
pub mod math;
pub mod node;
pub mod source;

pub use context::{FrameContext, ProcessContext};
pub use error::LagError;
pub use lag::{DEFAULT_LAG_TIME, DEFAULT_VALUE, Lag, coefficient};
pub use math::{LOG_001, flush_denormal};
pub use node::{AudioNode, NodeId, PortInfo};
pub use source::ScalarSource;
