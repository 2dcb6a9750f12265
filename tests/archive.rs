use std::{
    fs::File,
    io::Write,
    path::Path,
    sync::atomic::Ordering,
};

use polyglot_corpus::{
    error::Error,
    io::{chunk_name, ArchiveReader, ArchiveWriter},
    lang::LanguageTag,
    tokenize::{Document, Token},
};
use tempfile::tempdir;
use zip::{write::SimpleFileOptions, ZipWriter};

fn lang(tag: &str) -> LanguageTag {
    LanguageTag::parse(tag).unwrap()
}

fn texts(nb: usize) -> Vec<String> {
    (0..nb)
        .map(|x| format!("Document number {x}, with a few words."))
        .collect()
}

fn read_texts(reader: &ArchiveReader) -> Vec<String> {
    reader
        .iterate()
        .unwrap()
        .map(|doc| doc.unwrap().text())
        .collect()
}

fn write(path: &Path, tag: &str, texts: &[String], capacity: usize) {
    ArchiveWriter::open_for_write(path, lang(tag))
        .unwrap()
        .write_stream(texts, capacity)
        .unwrap();
}

#[test_log::test]
fn roundtrip_sizes() {
    let capacity = 7;
    let dir = tempdir().unwrap();

    for nb in [0, 1, capacity - 1, capacity, capacity + 1, 10 * capacity] {
        let path = dir.path().join(format!("en_{nb}.zip"));
        let input = texts(nb);
        write(&path, "en", &input, capacity);

        let reader = ArchiveReader::open(&path, lang("en")).unwrap();
        assert_eq!(read_texts(&reader), input, "{nb} documents");
        assert_eq!(
            reader.list_chunks().unwrap().len(),
            (nb + capacity - 1) / capacity,
            "{nb} documents"
        );
    }
}

#[test]
fn tokens_are_preserved() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fr.zip");
    let documents = vec![
        Document::new(vec![
            Token::new("L'été", true),
            Token::new("dernier", false),
            Token::new(".", false),
        ]),
        Document::default(),
        Document::new(vec![Token::new("Ljubljana", false)]),
    ];

    let summary = ArchiveWriter::open_for_write(&path, lang("fr"))
        .unwrap()
        .write_documents(documents.clone(), 2)
        .unwrap();
    assert_eq!(summary.chunks, 2);
    assert_eq!(summary.documents, 3);

    let reader = ArchiveReader::open(&path, lang("fr")).unwrap();
    let read: Vec<Document> = reader.iterate().unwrap().map(Result::unwrap).collect();
    assert_eq!(read, documents);
}

#[test]
fn more_than_a_thousand_chunks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.zip");
    let input = texts(1205);
    write(&path, "en", &input, 1);

    let reader = ArchiveReader::open(&path, lang("en")).unwrap();
    let chunks = reader.list_chunks().unwrap();
    let expected: Vec<String> = (0..1205).map(|i| chunk_name("en", i)).collect();
    assert_eq!(chunks, expected);
    assert_eq!(read_texts(&reader), input);
}

#[test]
fn chunks_are_sorted_numerically() {
    // three-digit padded names, as written by older tools
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.zip");
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    for index in [1000, 2, 999, 10] {
        let name = format!("en_{index:03}.avro");
        let sub = dir.path().join(format!("sub_{index}.zip"));
        write(&sub, "en", &[format!("chunk {index}")], 1);
        let bytes = ArchiveReader::open(&sub, lang("en"))
            .unwrap()
            .list_chunks()
            .map(|names| read_entry(&sub, &names[0]))
            .unwrap();
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(&bytes).unwrap();
    }
    zip.finish().unwrap();

    let reader = ArchiveReader::open(&path, lang("en")).unwrap();
    assert_eq!(
        reader.list_chunks().unwrap(),
        vec!["en_002.avro", "en_010.avro", "en_999.avro", "en_1000.avro"]
    );
    assert_eq!(
        read_texts(&reader),
        vec!["chunk 2", "chunk 10", "chunk 999", "chunk 1000"]
    );
}

fn read_entry(path: &Path, name: &str) -> Vec<u8> {
    use std::io::Read;
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).unwrap();
    bytes
}

#[test_log::test]
fn foreign_entries_are_skipped() {
    let dir = tempdir().unwrap();
    let en = dir.path().join("en.zip");
    write(&en, "en", &texts(3), 2);

    // same archive read as another language has no chunk
    let reader = ArchiveReader::open(&en, lang("fr")).unwrap();
    assert!(reader.list_chunks().unwrap().is_empty());
    assert_eq!(reader.iterate().unwrap().count(), 0);
}

#[test]
fn iterate_is_restartable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.zip");
    let input = texts(25);
    write(&path, "en", &input, 10);

    let reader = ArchiveReader::open(&path, lang("en")).unwrap();
    let partial: Vec<String> = reader
        .iterate()
        .unwrap()
        .take(13)
        .map(|doc| doc.unwrap().text())
        .collect();
    assert_eq!(partial, input[..13]);

    // a new iteration starts over
    assert_eq!(read_texts(&reader), input);
    assert_eq!(read_texts(&reader), input);
}

#[test]
fn iterate_single_chunk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.zip");
    let input = texts(25);
    write(&path, "en", &input, 10);

    let reader = ArchiveReader::open(&path, lang("en")).unwrap();
    let chunks = reader.list_chunks().unwrap();
    let last: Vec<String> = reader
        .iterate_chunk(&chunks[2])
        .unwrap()
        .map(|doc| doc.text())
        .collect();
    assert_eq!(last, input[20..]);

    assert!(matches!(
        reader.iterate_chunk("en_000042.avro"),
        Err(Error::Zip(_))
    ));
}

#[test_log::test]
fn corrupted_chunk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.zip");
    let good = dir.path().join("good.zip");
    write(&good, "en", &texts(2), 2);

    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    zip.start_file(chunk_name("en", 0), SimpleFileOptions::default())
        .unwrap();
    zip.write_all(&read_entry(&good, &chunk_name("en", 0)))
        .unwrap();
    zip.start_file(chunk_name("en", 1), SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"Obj\x01 but not really").unwrap();
    zip.finish().unwrap();

    let reader = ArchiveReader::open(&path, lang("en")).unwrap();
    match reader.iterate_chunk(&chunk_name("en", 1)) {
        Err(Error::ChunkDecode { chunk, .. }) => assert_eq!(chunk, chunk_name("en", 1)),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("corrupted chunk has been decoded"),
    }

    // documents of the good chunk come first, then the error, then nothing
    let mut docs = reader.iterate().unwrap();
    assert!(docs.next().unwrap().is_ok());
    assert!(docs.next().unwrap().is_ok());
    assert!(matches!(
        docs.next(),
        Some(Err(Error::ChunkDecode { .. }))
    ));
    assert!(docs.next().is_none());
}

#[test]
fn missing_archive() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        ArchiveReader::open(&dir.path().join("nope.zip"), lang("en")),
        Err(Error::Io(_))
    ));
}

#[test]
fn existing_archive_is_kept() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.zip");
    let input = texts(5);
    write(&path, "en", &input, 2);

    assert!(matches!(
        ArchiveWriter::open_for_write(&path, lang("en")),
        Err(Error::ArchiveExists(_))
    ));
    let reader = ArchiveReader::open(&path, lang("en")).unwrap();
    assert_eq!(read_texts(&reader), input);
}

#[test_log::test]
fn stop_handle_finishes_current_chunk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("en.zip");
    let writer = ArchiveWriter::open_for_write(&path, lang("en")).unwrap();
    let stop = writer.stop_handle();

    // unbounded input, stopped while the second chunk is being filled
    let input = (0..).map(|x: usize| {
        if x == 15 {
            stop.store(true, Ordering::SeqCst);
        }
        format!("line {x}")
    });
    let summary = writer.write_stream(input, 10).unwrap();
    assert!(summary.stopped);
    assert_eq!(summary.chunks, 2);
    assert_eq!(summary.documents, 20);

    let reader = ArchiveReader::open(&path, lang("en")).unwrap();
    assert_eq!(reader.list_chunks().unwrap().len(), 2);
    let read = read_texts(&reader);
    assert_eq!(read.len(), 20);
    assert_eq!(read[19], "line 19");
}

#[test]
fn languages_with_subtags() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zh-Hant.zip");
    write(&path, "zh_hant", &["漢字".to_string()], 10);

    let reader = ArchiveReader::open(&path, lang("zh-Hant")).unwrap();
    assert_eq!(reader.list_chunks().unwrap(), vec!["zh-Hant_000000.avro"]);
    assert_eq!(read_texts(&reader), vec!["漢字"]);
}
