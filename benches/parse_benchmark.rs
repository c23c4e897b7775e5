//! Benchmarks for mdmerge conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic chapters mixing every block kind.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mdmerge::{apply_all, DocxDocument, MarkdownParser, RecordingSink};

/// Creates a synthetic markdown chapter with the given number of sections.
fn create_test_markdown(sections: usize) -> String {
    let mut content = String::from("# Chapter 5\n\n");

    for i in 0..sections {
        content.push_str(&format!("## Section {}\n\n", i + 1));
        content.push_str(
            "Survey answers were **mostly positive**, with *some* reservations about cost.\n\n",
        );
        content.push_str("| Question | Mean | SD |\n|---|---|---|\n");
        for row in 0..5 {
            content.push_str(&format!("| Q{} | {}.{} | 0.{} |\n", row + 1, 3 + row % 2, row, row + 4));
        }
        content.push_str("\n---\n\n");
        content.push_str("### Notes\n\nA plain paragraph with no markup at all.\n\n");
    }

    content
}

/// Benchmark the operation stream at various sizes.
fn bench_markdown_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_parsing");
    let parser = MarkdownParser::new();

    for sections in [1, 10, 100].iter() {
        let text = create_test_markdown(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| parser.operations(black_box(&text)).count());
        });
    }

    group.finish();
}

/// Benchmark the inline tokenizer on a single line.
fn bench_inline_tokenizer(c: &mut Criterion) {
    let tokenizer = mdmerge::parser::InlineTokenizer::new();
    let line = "Some **bold** and *italic* text with **several** *spans* per line.";

    c.bench_function("inline_tokenize", |b| {
        b.iter(|| tokenizer.tokenize(black_box(line)));
    });
}

/// Benchmark applying operations to sinks.
fn bench_apply(c: &mut Criterion) {
    let ops = MarkdownParser::new().parse(&create_test_markdown(10)).operations;

    c.bench_function("apply_recording_sink", |b| {
        b.iter(|| {
            let mut sink = RecordingSink::new();
            apply_all(&mut sink, black_box(ops.clone())).unwrap()
        });
    });

    c.bench_function("apply_docx_and_serialize", |b| {
        b.iter(|| {
            let mut doc = DocxDocument::new();
            apply_all(&mut doc, black_box(ops.clone())).unwrap();
            doc.to_bytes().unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_markdown_parsing,
    bench_inline_tokenizer,
    bench_apply,
);
criterion_main!(benches);
