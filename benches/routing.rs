//! Criterion benchmarks for router compilation, parsing and writing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use endpoint_router::EndpointCodec;

#[path = "../tests/common/mod.rs"]
mod common;

use common::{Admin, Expr, Page};

/// Benchmark: compiling an endpoint type without the cache
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    group.bench_function("page", |b| {
        b.iter(EndpointCodec::<Page>::compile);
    });
    group.bench_function("recursive", |b| {
        b.iter(EndpointCodec::<Expr>::compile);
    });

    group.finish();
}

/// Benchmark: parsing paths of varying shape
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let codec = EndpointCodec::<Page>::shared().expect("valid endpoint type");

    let test_cases = [
        ("root", "/"),
        ("literal", "/About"),
        ("parameter", "/book/978-0-13-468599-1"),
        ("shared_prefix", "/book/978-0-13-468599-1/chapter/12"),
        ("sequence", "/tags/4/rust/web/router/url"),
        ("rest", "/files/7/src/bin/main.rs"),
        ("nested_union", "/admin/theme"),
        ("with_query", "/book/isbn?ref=home#top"),
        ("no_match", "/book/isbn/chapter/not-a-number"),
    ];

    for (name, path) in test_cases {
        group.throughput(Throughput::Bytes(path.len() as u64));
        group.bench_with_input(BenchmarkId::new("path", name), &path, |b, path| {
            b.iter(|| codec.parse(black_box(path)));
        });
    }

    group.finish();
}

/// Benchmark: writing endpoint values
fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let codec = EndpointCodec::<Page>::shared().expect("valid endpoint type");

    let test_cases = [
        ("literal", Page::About),
        (
            "shared_prefix",
            Page::Chapter {
                isbn: "978-0-13-468599-1".to_string(),
                n: 12,
            },
        ),
        (
            "sequence",
            Page::Tags {
                tags: vec!["rust".into(), "web".into(), "router".into(), "url".into()],
            },
        ),
        (
            "rest",
            Page::Files {
                owner: 7,
                path: "src/bin/main rs".to_string(),
            },
        ),
        (
            "nested_union",
            Page::Admin {
                section: Admin::Settings {
                    key: "theme".to_string(),
                },
            },
        ),
    ];

    for (name, page) in test_cases {
        group.bench_with_input(BenchmarkId::new("page", name), &page, |b, page| {
            b.iter(|| codec.write(black_box(page)));
        });
    }

    group.finish();
}

/// Benchmark: recursive endpoint values at varying depths
fn bench_recursive(c: &mut Criterion) {
    let mut group = c.benchmark_group("recursive");
    let codec = EndpointCodec::<Expr>::shared().expect("valid endpoint type");

    for depth in [1, 4, 16, 64] {
        let mut expr = Expr::Num { n: 1 };
        for _ in 0..depth {
            expr = Expr::Neg {
                inner: Box::new(expr),
            };
        }
        let path = codec.write(&expr);

        group.bench_with_input(BenchmarkId::new("parse_depth", depth), &path, |b, path| {
            b.iter(|| codec.parse(black_box(path)));
        });
        group.bench_with_input(BenchmarkId::new("write_depth", depth), &expr, |b, expr| {
            b.iter(|| codec.write(black_box(expr)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compile,
    bench_parse,
    bench_write,
    bench_recursive,
);
criterion_main!(benches);
