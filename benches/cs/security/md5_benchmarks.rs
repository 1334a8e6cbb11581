use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use textdigest::{digest, md5_digest, TextDigester};

fn bench_md5_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5");
    for size in [0usize, 55, 64, 1024, 64 * 1024] {
        let data = vec![0xa5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| md5_digest(black_box(data)))
        });
    }
    group.finish();
}

fn bench_text_digest(c: &mut Criterion) {
    let text = "日本語 Hello World! ".repeat(64);
    c.bench_function("digest_text", |b| b.iter(|| digest(black_box(&text))));

    let texts: Vec<String> = (0..1000).map(|i| format!("line {} {}", i, text)).collect();
    let digester = TextDigester::default();
    c.bench_function("digest_many_1000", |b| {
        b.iter(|| digester.digest_many(black_box(&texts)))
    });
}

criterion_group!(benches, bench_md5_sizes, bench_text_digest);
criterion_main!(benches);
