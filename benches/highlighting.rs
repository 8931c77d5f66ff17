//! Benchmarks for syntax highlighting.

use std::path::Path;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tex::editor::LineStore;
use tex::highlight::{highlight_line, select_for};

fn bench_highlight_line(c: &mut Criterion) {
    let syntax = select_for(Path::new("main.c"));
    let render = b"static int count = 42; /* counter */ char *s = \"text\"; // done".to_vec();
    let mut out = Vec::new();
    c.bench_function("highlight_line", |b| {
        b.iter(|| highlight_line(black_box(&render), syntax, false, &mut out))
    });
}

fn bench_comment_cascade(c: &mut Criterion) {
    let lines: Vec<Vec<u8>> = (0..1000).map(|n| format!("int x{n} = {n};").into_bytes()).collect();
    c.bench_function("comment_cascade", |b| {
        b.iter_batched(
            || LineStore::from_lines(lines.clone(), 8, select_for(Path::new("main.c"))),
            |mut store| {
                store.insert_line(0, b"/*".to_vec());
                store
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_highlight_line, bench_comment_cascade);
criterion_main!(benches);
