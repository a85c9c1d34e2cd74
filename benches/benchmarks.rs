use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aln2img::aln::{parse_records, remap, AlignmentTable, ParalogSentinel, PositionFilter};
use aln2img::util::window::Window;

fn make_seq(len: usize, seed: u32) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = seed;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

/// 500 samples x 231 bp, every tenth sample with a second paralog copy.
fn make_fasta() -> String {
    let mut out = String::new();
    for i in 0..500u32 {
        let copies = if i % 10 == 0 { 2 } else { 1 };
        for c in 0..copies {
            out.push_str(&format!(">sample{}_{}:1000-1231(+)\n", i, c));
            out.push_str(std::str::from_utf8(&make_seq(231, i * 7 + c)).unwrap());
            out.push('\n');
        }
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let fasta = make_fasta();
    c.bench_function("parse_records_500x231", |b| {
        b.iter(|| {
            black_box(parse_records(black_box(fasta.as_bytes())).unwrap());
        })
    });
}

fn bench_build_table(c: &mut Criterion) {
    let fasta = make_fasta();
    let (records, _) = parse_records(fasta.as_bytes()).unwrap();
    let window = Window::default();

    c.bench_function("build_table_500x231", |b| {
        b.iter(|| {
            let recs = remap(records.clone(), window, None);
            black_box(AlignmentTable::build(recs, &ParalogSentinel));
        })
    });

    let filter = PositionFilter::new(-50, 10).ok();
    c.bench_function("build_table_filtered_500x61", |b| {
        b.iter(|| {
            let recs = remap(records.clone(), window, filter);
            black_box(AlignmentTable::build(recs, &ParalogSentinel));
        })
    });
}

criterion_group!(benches, bench_parse, bench_build_table);
criterion_main!(benches);
