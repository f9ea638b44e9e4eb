//! Criterion benchmarks for ambifx-core primitives
//!
//! Run with: cargo bench -p ambifx-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ambifx_core::{
    BUFFER_SIZE, BiquadFilter, BiquadType, ChannelGains, EnvelopeFollower, WAVEFORM_FRAC_ONE,
    WaveGenerator, mix_samples, rcp_q_from_bandwidth,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("BiquadFilter");

    let f0norm = 800.0 / SAMPLE_RATE;
    let rcp_q = rcp_q_from_bandwidth(f0norm, 0.75);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut output = vec![0.0; block_size];

        group.bench_with_input(BenchmarkId::new("highpass", block_size), &block_size, |b, _| {
            let mut filter = BiquadFilter::new();
            filter.set_params(BiquadType::HighPass, 1.0, f0norm, rcp_q);
            b.iter(|| {
                filter.process(black_box(&mut output), black_box(&input));
            });
        });
    }

    group.bench_function("set_params", |b| {
        let mut filter = BiquadFilter::new();
        b.iter(|| {
            let f0norm = black_box(f0norm);
            filter.set_params(BiquadType::HighPass, 1.0, f0norm, rcp_q_from_bandwidth(f0norm, 0.75));
        });
    });

    group.finish();
}

fn bench_waveforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("WaveGenerator");
    let step = (440.0 / SAMPLE_RATE * WAVEFORM_FRAC_ONE as f32) as u32;
    let mut buf = [0.0f32; 128];

    for (name, generator) in [
        ("sine", WaveGenerator::Sine),
        ("sawtooth", WaveGenerator::Sawtooth),
        ("square", WaveGenerator::Square),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| generator.fill(black_box(&mut buf), black_box(0), step));
        });
    }

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let input = generate_test_signal(1024);

    c.bench_function("EnvelopeFollower/1024", |b| {
        let mut env = EnvelopeFollower::new(0.5, 2.0);
        env.set_times(SAMPLE_RATE, 0.1, 0.2);
        b.iter(|| {
            for &x in &input {
                black_box(env.next(env.clamp(x.abs())));
            }
        });
    });
}

fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("mix_samples");
    let input = generate_test_signal(BUFFER_SIZE);

    for channels in [4usize, 16] {
        let mut output = vec![[0.0f32; BUFFER_SIZE]; channels];

        group.bench_with_input(BenchmarkId::new("settled", channels), &channels, |b, _| {
            let mut gains = ChannelGains::new();
            gains.target[..channels].fill(0.5);
            gains.snap_to_target();
            b.iter(|| mix_samples(black_box(&input[..1024]), &mut output, &mut gains, 1024, 0));
        });

        group.bench_with_input(BenchmarkId::new("ramping", channels), &channels, |b, _| {
            b.iter(|| {
                let mut gains = ChannelGains::new();
                gains.target[..channels].fill(0.5);
                mix_samples(black_box(&input[..1024]), &mut output, &mut gains, 1024, 0);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_biquad, bench_waveforms, bench_envelope, bench_mix);
criterion_main!(benches);
