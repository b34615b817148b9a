use criterion::{Criterion, black_box, criterion_group, criterion_main};
use region_scan::format::{format_outcome, hex_encode};
use region_scan::models::{BarcodeResult, DecodeOutcome};
use std::time::Duration;

fn bench_hex_encode_small(c: &mut Criterion) {
    let payload: Vec<u8> = (0..64u8).collect();
    c.bench_function("hex_encode_64", |b| {
        b.iter(|| hex_encode(black_box(&payload)))
    });
}

fn bench_hex_encode_large(c: &mut Criterion) {
    let payload: Vec<u8> = (0..4096usize).map(|i| (i % 256) as u8).collect();
    c.bench_function("hex_encode_4096", |b| {
        b.iter(|| hex_encode(black_box(&payload)))
    });
}

fn bench_format_success_report(c: &mut Criterion) {
    let results: Vec<BarcodeResult> = (0..10)
        .map(|i| {
            let payload: Vec<u8> = (0..128usize).map(|j| ((i + j) % 256) as u8).collect();
            BarcodeResult::new("QR_CODE", format!("payload-{i}"), payload)
        })
        .collect();
    let outcome = DecodeOutcome::Success {
        results,
        elapsed: Duration::from_millis(250),
    };
    c.bench_function("format_success_10x128", |b| {
        b.iter(|| format_outcome(black_box(&outcome)))
    });
}

criterion_group!(
    benches,
    bench_hex_encode_small,
    bench_hex_encode_large,
    bench_format_success_report
);
criterion_main!(benches);
