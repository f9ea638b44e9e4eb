//! Property-based tests for the core mixing and DSP primitives.

use ambifx_core::{
    BUFFER_SIZE, BiquadFilter, BiquadType, ChannelGains, EnvelopeFollower, MAX_OUTPUT_CHANNELS,
    WAVEFORM_FRAC_MASK, WAVEFORM_FRAC_ONE, WaveGenerator, Waveform, mix_samples,
    rcp_q_from_bandwidth,
};
use proptest::prelude::*;

fn silent_bus(channels: usize) -> Vec<[f32; BUFFER_SIZE]> {
    vec![[0.0; BUFFER_SIZE]; channels]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A ramp never overshoots, moves by a bounded amount per sample and
    /// lands exactly on the target at the end of the counter.
    #[test]
    fn crossfade_is_monotonic_and_exact(
        start in -1.0f32..=1.0,
        target in -1.0f32..=1.0,
        split in 1usize..512,
        total in 512usize..=BUFFER_SIZE,
    ) {
        prop_assume!((target - start).abs() > 1e-3);

        let mut out = silent_bus(1);
        let mut gains = ChannelGains::new();
        gains.current[0] = start;
        gains.target[0] = target;

        let ones = vec![1.0f32; total];
        mix_samples(&ones[..split], &mut out, &mut gains, total, 0);
        mix_samples(&ones[split..], &mut out, &mut gains, total - split, split);

        prop_assert_eq!(gains.current[0], target);

        let (lo, hi) = if start < target { (start, target) } else { (target, start) };
        let max_step = (target - start).abs() / total as f32 + 1e-5;
        let mut prev = start;
        for &s in &out[0][..total] {
            prop_assert!(s >= lo - 1e-5 && s <= hi + 1e-5, "{s} outside [{lo}, {hi}]");
            prop_assert!((s - prev).abs() <= max_step, "step {} > {max_step}", (s - prev).abs());
            prev = s;
        }
    }

    /// Mixing is additive and never touches channels beyond the gain set.
    #[test]
    fn mixing_accumulates(
        data in prop::collection::vec(-1.0f32..=1.0, 1..256),
        gain in 0.001f32..=1.0,
        bias in -1.0f32..=1.0,
    ) {
        let mut out = silent_bus(2);
        out[0][..data.len()].fill(bias);

        let mut gains = ChannelGains::new();
        gains.target[0] = gain;
        gains.snap_to_target();

        let n = data.len();
        mix_samples(&data, &mut out, &mut gains, n, 0);

        for (i, &d) in data.iter().enumerate() {
            prop_assert!((out[0][i] - (bias + d * gain)).abs() < 1e-6);
        }
        prop_assert!(out[1].iter().all(|&s| s == 0.0));
    }

    /// Filling in chunks advances the phase exactly as one long fill.
    #[test]
    fn waveform_phase_chunking(
        step in 1u32..WAVEFORM_FRAC_ONE,
        chunks in prop::collection::vec(1usize..200, 1..8),
    ) {
        let total: usize = chunks.iter().sum();
        let mut whole = vec![0.0f32; total];
        WaveGenerator::Sawtooth.fill(&mut whole, 0, step);

        let mut pieces = vec![0.0f32; total];
        let mut index = 0u32;
        let mut base = 0;
        for len in chunks {
            WaveGenerator::Sawtooth.fill(&mut pieces[base..base + len], index, step);
            index = (index + (step.wrapping_mul(len as u32) & WAVEFORM_FRAC_MASK)) & WAVEFORM_FRAC_MASK;
            base += len;
        }

        prop_assert_eq!(whole, pieces);
        prop_assert_eq!(
            index as u64,
            (step as u64 * total as u64) % WAVEFORM_FRAC_ONE as u64
        );
    }

    /// Every waveform stays within [-1, 1].
    #[test]
    fn waveforms_bounded(index in 0u32..WAVEFORM_FRAC_ONE) {
        for waveform in Waveform::ALL {
            let v = WaveGenerator::select(waveform, 1).sample(index);
            prop_assert!((-1.0..=1.0).contains(&v), "{waveform:?} at {index} = {v}");
        }
    }

    /// The envelope never leaves its range for any clamped input.
    #[test]
    fn envelope_bounded(input in prop::collection::vec(-4.0f32..=4.0, 1..2000)) {
        let mut env = EnvelopeFollower::new(0.5, 2.0);
        env.set_times(48000.0, 0.1, 0.2);
        for x in input {
            let level = env.next(env.clamp(x.abs()));
            prop_assert!((0.5..=2.0).contains(&level));
        }
    }

    /// The high-pass stays stable over the clamped cutoff range.
    #[test]
    fn highpass_stable(f0norm in (1.0f32 / 512.0)..=0.49, noise in prop::collection::vec(-1.0f32..=1.0, 256)) {
        let mut filter = BiquadFilter::new();
        filter.set_params(BiquadType::HighPass, 1.0, f0norm, rcp_q_from_bandwidth(f0norm, 0.75));
        let mut out = vec![0.0f32; noise.len()];
        for _ in 0..8 {
            filter.process(&mut out, &noise);
            prop_assert!(out.iter().all(|s| s.is_finite() && s.abs() < 32.0));
        }
    }
}

#[test]
fn gain_arrays_cover_output_bus() {
    let gains = ChannelGains::default();
    assert_eq!(gains.current.len(), MAX_OUTPUT_CHANNELS);
    assert!(gains.is_settled());
}
