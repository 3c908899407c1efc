//! Configuration for lagtime lag filter nodes.
//!
//! Loads, validates and saves [`LagConfig`] TOML files and turns them into
//! ready-to-run [`Lag`] filters. Values the filter would reject (zero or
//! negative lag times, NaN targets) are rejected at load time with
//! [`ConfigError::Invalid`], never mid-stream.
//!
//! # Example
//!
//! ```rust,no_run
//! use lagtime_config::LagConfig;
//!
//! let config = LagConfig::load("cutoff_glide.toml").unwrap();
//! let mut lag = config.build().unwrap();
//!
//! // Later, retarget from an edited file without resetting the glide
//! LagConfig::load("cutoff_glide.toml").unwrap().apply(&mut lag).unwrap();
//! ```

mod error;
mod lag_config;

pub use error::ConfigError;
pub use lag_config::LagConfig;

/// Re-export the filter types a configuration produces
pub use lagtime_core::{Lag, LagError};
