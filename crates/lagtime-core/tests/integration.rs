//! Integration tests for lagtime-core.
//!
//! Drives `Lag` the way a host graph does: through `AudioNode::generate`
//! with a `FrameContext` rebuilt every sample, upstream nodes feeding both
//! inputs, and sample-rate independence of the 60 dB settling time.

use lagtime_core::{AudioNode, FrameContext, Lag, NodeId, ProcessContext, ScalarSource};

/// Run a constant-input lag for `samples` samples and return the final output.
fn settle(lag: &mut Lag, sample_rate: f32, samples: usize) -> f32 {
    let ctx = FrameContext::new(sample_rate, &[]).unwrap();
    let mut out = 0.0;
    for _ in 0..samples {
        out = lag.process_sample(&ctx);
    }
    out
}

// ============================================================================
// 1. 60 dB settling time
// ============================================================================

#[test]
fn settles_to_within_0_1_percent_after_lag_time() {
    for &sample_rate in &[22050.0_f32, 44100.0, 48000.0, 96000.0] {
        for &lag_time in &[0.01_f32, 0.1, 0.5] {
            let mut lag = Lag::new(Some(1.0), Some(lag_time)).unwrap();
            let n = libm::ceilf(lag_time * sample_rate) as usize;
            let out = settle(&mut lag, sample_rate, n);
            let err = (1.0 - out).abs();
            assert!(
                err <= 0.001 + 1e-6,
                "sr={sample_rate} lag={lag_time}: error {err} after {n} samples"
            );
            assert!(
                err >= 0.001 * 0.95,
                "sr={sample_rate} lag={lag_time}: settled too fast, error {err}"
            );
        }
    }
}

#[test]
fn long_lag_times_settle_and_keep_converging() {
    for &sample_rate in &[44100.0_f32, 48000.0, 96000.0] {
        for &lag_time in &[2.0_f32, 5.0, 10.0] {
            let mut lag = Lag::new(Some(1.0), Some(lag_time)).unwrap();
            let n = libm::ceilf(lag_time * sample_rate) as usize;

            let err = (1.0 - settle(&mut lag, sample_rate, n)).abs();
            assert!(
                err <= 0.001 + 1e-6,
                "sr={sample_rate} lag={lag_time}: error {err} after {n} samples"
            );

            // 4 more lag times: 240 dB further, well under f32 resolution
            let err = (1.0 - settle(&mut lag, sample_rate, 4 * n)).abs();
            assert!(
                err <= 1e-7,
                "sr={sample_rate} lag={lag_time}: stalled at {err} after {} samples",
                5 * n
            );
        }
    }
}

#[test]
fn settles_past_60db_shortly_after_lag_time() {
    let mut lag = Lag::new(Some(1.0), Some(1.0)).unwrap();
    let out = settle(&mut lag, 44100.0, 44100 * 105 / 100);
    assert!((1.0 - out).abs() < 0.001, "got {out}");
}

#[test]
fn half_lag_time_leaves_about_minus_30db() {
    // coeff^(n/2) = sqrt(0.001)
    let mut lag = Lag::new(Some(1.0), Some(0.2)).unwrap();
    let out = settle(&mut lag, 48000.0, 4800);
    let expected = 1.0 - libm::sqrtf(0.001);
    assert!(
        (out - expected).abs() < 1e-3,
        "expected ~{expected}, got {out}"
    );
}

#[test]
fn decay_from_five_toward_zero() {
    let mut lag = Lag::new(Some(0.0), Some(1.0)).unwrap();
    lag.set_immediate(5.0).unwrap();
    lag.set_value(0.0).unwrap();

    let ctx = FrameContext::new(44100.0, &[]).unwrap();
    let mut prev = 5.0_f32;
    for _ in 0..44100 {
        let out = lag.process_sample(&ctx);
        assert!(out <= prev, "decay must be monotonic: {out} > {prev}");
        assert!(out >= 0.0, "decay must not overshoot zero: {out}");
        prev = out;
    }
    assert!(prev <= 5.0 * 0.001 + 1e-4, "got {prev}");
}

// ============================================================================
// 2. Graph wiring
// ============================================================================

#[test]
fn follows_upstream_target_through_generate() {
    let mut lag = Lag::new(None, Some(0.01)).unwrap();
    lag.connect_value(NodeId(0), 0);
    let node: &mut dyn AudioNode = &mut lag;

    let sample_rate = 48000.0;
    let base = FrameContext::new(sample_rate, &[]).unwrap();
    let mut slot = [0.0_f32];

    // Square wave control signal, 100 ms per half period
    let mut outputs = Vec::new();
    for n in 0..9600 {
        let target = [if n < 4800 { 1.0_f32 } else { -1.0 }];
        let frames: [&[f32]; 1] = [&target];
        let ctx = base.with_frames(&frames);
        node.generate(&ctx, &mut slot);
        outputs.push(slot[0]);
    }

    // Each half period is 10 lag times: fully settled at each edge
    assert!((outputs[4799] - 1.0).abs() < 1e-4, "got {}", outputs[4799]);
    assert!((outputs[9599] + 1.0).abs() < 1e-4, "got {}", outputs[9599]);

    // No discontinuity at the edge: the first sample after the flip moves by
    // (1 - coeff) of the jump, not the whole jump.
    let jump = (outputs[4800] - outputs[4799]).abs();
    assert!(jump < 0.05, "edge produced a click of {jump}");
}

#[test]
fn modulated_lag_time_changes_speed() {
    let mut fast = Lag::new(Some(1.0), None).unwrap();
    let mut slow = Lag::new(Some(1.0), None).unwrap();
    fast.connect_lag(NodeId(0), 0);
    slow.connect_lag(NodeId(0), 1);

    let lag_times = [0.001_f32, 0.1];
    let frames: [&[f32]; 1] = [&lag_times];
    let ctx = FrameContext::new(48000.0, &frames).unwrap();

    for _ in 0..48 {
        fast.process_sample(&ctx);
        slow.process_sample(&ctx);
    }
    assert!(fast.last_output() > 0.998, "fast got {}", fast.last_output());
    assert!(slow.last_output() < 0.1, "slow got {}", slow.last_output());
}

#[test]
fn unplugged_upstream_reads_silence() {
    let mut lag = Lag::with_sources(
        ScalarSource::upstream(NodeId(4), 0),
        ScalarSource::Constant(0.001),
    )
    .unwrap();
    lag.set_immediate(1.0).unwrap();
    lag.connect_value(NodeId(4), 0);

    // No frame for node 4 in this context
    let out = settle(&mut lag, 48000.0, 480);
    assert!(out.abs() < 1e-6, "should decay to silence, got {out}");
}

#[test]
fn boxed_nodes_are_send() {
    fn assert_send<T: Send>(_: &T) {}
    let node: Box<dyn AudioNode + Send> = Box::new(Lag::default());
    assert_send(&node);
    assert_eq!(node.type_tag(), "Lag");
}

#[test]
fn custom_context_is_accepted() {
    struct Fixed;
    impl ProcessContext for Fixed {
        fn sample_rate(&self) -> f32 {
            1000.0
        }
        fn upstream_output(&self, _node: NodeId, _output: usize) -> Option<f32> {
            Some(2.0)
        }
    }

    let mut lag = Lag::new(None, Some(1.0)).unwrap();
    lag.connect_value(NodeId(0), 0);
    let mut out = 0.0;
    for _ in 0..1000 {
        out = lag.process_sample(&Fixed);
    }
    assert!((out - 2.0).abs() <= 2.0 * 0.001 + 1e-4, "got {out}");
}

// ============================================================================
// 3. Lifecycle
// ============================================================================

#[test]
fn reset_restarts_the_glide_from_zero() {
    let mut a = Lag::new(Some(1.0), Some(0.05)).unwrap();
    let mut b = a.clone();

    settle(&mut a, 48000.0, 1000);
    a.reset();

    let ctx = FrameContext::new(48000.0, &[]).unwrap();
    for _ in 0..100 {
        assert_eq!(a.process_sample(&ctx), b.process_sample(&ctx));
    }
}

#[test]
fn type_tag_and_display_agree() {
    let lag = Lag::default();
    assert_eq!(lag.to_string(), lag.type_tag());
}
