use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use polyglot_corpus::{
    io::{ArchiveReader, ArchiveWriter},
    lang::LanguageTag,
};
use tempfile::tempdir;

const DOCUMENTS: usize = 10_000;
const CAPACITY: usize = 1_000;

fn texts() -> Vec<String> {
    (0..DOCUMENTS)
        .map(|x| format!("This is document number {x}, a completely innocent phrase."))
        .collect()
}

pub fn archive_benchmark(c: &mut Criterion) {
    let en = LanguageTag::parse("en").unwrap();
    let input = texts();

    c.bench_function("write 10k documents", |b| {
        b.iter_batched(
            || tempdir().unwrap(),
            |dir| {
                ArchiveWriter::open_for_write(&dir.path().join("en.zip"), en.clone())
                    .unwrap()
                    .write_stream(&input, CAPACITY)
                    .unwrap()
            },
            BatchSize::PerIteration,
        )
    });

    let dir = tempdir().unwrap();
    let path = dir.path().join("en.zip");
    ArchiveWriter::open_for_write(&path, en.clone())
        .unwrap()
        .write_stream(&input, CAPACITY)
        .unwrap();
    let reader = ArchiveReader::open(&path, en).unwrap();

    c.bench_function("read 10k documents", |b| {
        b.iter(|| reader.iterate().unwrap().map(|doc| doc.unwrap().len()).sum::<usize>())
    });
}

criterion_group!(benches, archive_benchmark);
criterion_main!(benches);
