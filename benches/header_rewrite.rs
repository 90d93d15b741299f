use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use license_updater::license::header::{rewrite, strip_license};

const HEADER: &str = "/*\nCopyright 2021 Example, Inc.\nSPDX-License-Identifier: MIT\n*/\n\n";

/// A Go-like source file of roughly `lines` lines, optionally with an existing header
fn generate_source(lines: usize, with_header: bool) -> Vec<u8> {
    let mut content = String::new();
    if with_header {
        content.push_str("/*\nCopyright 2018 Someone Else.\n\nLicensed under the Apache License, Version 2.0\n*/\n\n");
    }
    content.push_str("package controllers\n\n");
    for i in 0..lines {
        content.push_str(&format!("func handler{}(ctx context.Context) error {{ return nil }}\n", i));
    }
    content.into_bytes()
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");

    for lines in [10, 1_000, 50_000] {
        let headerless = generate_source(lines, false);
        let headered = generate_source(lines, true);

        group.bench_with_input(BenchmarkId::new("headerless", lines), &headerless, |b, content| {
            b.iter(|| rewrite(black_box(content), black_box(HEADER.as_bytes())))
        });
        group.bench_with_input(BenchmarkId::new("replace_header", lines), &headered, |b, content| {
            b.iter(|| rewrite(black_box(content), black_box(HEADER.as_bytes())))
        });
    }

    group.finish();
}

fn bench_strip(c: &mut Criterion) {
    let content = generate_source(10_000, true);
    c.bench_function("strip_license_10k_lines", |b| {
        b.iter(|| strip_license(black_box(&content)).len())
    });
}

criterion_group!(benches, bench_rewrite, bench_strip);
criterion_main!(benches);
