#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use parsemark_core::alloc::{Allocator, ResetArena};
use parsemark_parsers::{ByteScanner, Document, HookedParser};

// A small page with the shapes that cost allocations: nesting,
// attributes, text runs, a comment, and a raw-text element.
const FIXTURE: &[u8] = br#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>fixture</title>
  <style>body { margin: 0; }</style>
</head>
<body>
  <!-- navigation -->
  <ul id="nav" class="menu">
    <li class="item"><a href="/one" data-prefix="pre-1">one</a></li>
    <li class="item"><a href="/two" data-prefix="pre-2">two</a></li>
    <li class="item skip"><a href="/three">three</a></li>
  </ul>
  <p>Plain text with <b>bold</b> and <i>italics</i> and a stray < bracket.</p>
  <img src="/logo.png" alt="logo">
</body>
</html>
"#;

fn benchmark_hooked_parse(c: &mut Criterion) {
    let parser = HookedParser::new();
    let mut arena = ResetArena::new();

    c.bench_function("hooked_parse", |b| {
        b.iter(|| {
            let tree = parser.parse(black_box(FIXTURE), &mut arena).unwrap();
            black_box(tree.node_count());
            arena.reset();
        })
    });
}

fn benchmark_reuse_parse(c: &mut Criterion) {
    let mut doc = Document::new();

    c.bench_function("reuse_parse", |b| {
        b.iter(|| {
            doc.clear();
            doc.parse(black_box(FIXTURE)).unwrap();
            black_box(doc.node_count());
        })
    });
}

fn benchmark_scan(c: &mut Criterion) {
    let scanner = ByteScanner::new();

    c.bench_function("byte_scan", |b| {
        b.iter(|| black_box(scanner.scan(black_box(FIXTURE))))
    });
}

criterion_group!(
    benches,
    benchmark_hooked_parse,
    benchmark_reuse_parse,
    benchmark_scan
);
criterion_main!(benches);
