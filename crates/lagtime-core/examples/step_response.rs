//! Step response of the lag filter, logged at -20/-40/-60 dB crossings.
//!
//! Run with: cargo run -p lagtime-core --example step_response --features tracing
//!
//! Set `RUST_LOG=debug` to also see construction and rebinding events.

use lagtime_core::{FrameContext, Lag, LagError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), LagError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let sample_rate = 48000.0;
    let lag_time = 0.25;
    let ctx = FrameContext::new(sample_rate, &[])?;
    let mut lag = Lag::new(Some(1.0), Some(lag_time))?;

    let thresholds = [(0.1_f32, "-20 dB"), (0.01, "-40 dB"), (0.001, "-60 dB")];
    let mut next = 0;
    let mut n = 0_u32;
    while next < thresholds.len() {
        let out = lag.process_sample(&ctx);
        n += 1;
        let (remaining, label) = thresholds[next];
        if 1.0 - out <= remaining {
            tracing::info!(
                "{label} reached after {n} samples ({:.1} ms), output {out:.6}",
                n as f32 * 1000.0 / sample_rate
            );
            next += 1;
        }
    }

    // Rejected parameters never reach the audio path
    if let Err(err) = lag.set_lag_time(0.0) {
        tracing::warn!("{err}");
    }
    tracing::info!("{lag} still using {:?}", lag.lag_source());

    Ok(())
}
