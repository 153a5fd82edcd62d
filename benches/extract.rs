// benches/extract.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use html_report::extract::first_table;

/// A report-sized page: some chrome, then a wide table with entities and inline markup.
fn synthetic_page(rows: usize) -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><style>td { color: red; }</style>\
        <script>var x = '<table>';</script></head><body><h1>Results</h1>\
        <table><tr><th>Assesslet Name</th><th>Failed</th><th>Notes</th></tr>");
    for i in 0..rows {
        html.push_str(&format!(
            "<tr><td> Case <b>{i}</b> </td><td>{}</td><td>R&amp;D &#8211; run {i}</td></tr>",
            i % 2
        ));
    }
    html.push_str("</table><table><tr><td>ignored</td></tr></table></body></html>");
    html
}

fn bench_extract(c: &mut Criterion) {
    let small = synthetic_page(50);
    let large = synthetic_page(5_000);

    c.bench_function("first_table_50_rows", |b| {
        b.iter(|| {
            let table = first_table(black_box(&small));
            black_box(table.map(|t| t.row_count()))
        })
    });

    c.bench_function("first_table_5000_rows", |b| {
        b.iter(|| {
            let table = first_table(black_box(&large));
            black_box(table.map(|t| t.row_count()))
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
