/*! Archive writing.

[ArchiveWriter] consumes a stream of texts (or already tokenized [Document]s) and writes them in chunks of a given capacity.
Documents are streamed into the container as they come: a chunk is never held in memory as a whole.

```no_run
use std::path::Path;
use polyglot_corpus::{io::ArchiveWriter, lang::LanguageTag};

let lang = LanguageTag::parse("fr").unwrap();
let writer = ArchiveWriter::open_for_write(Path::new("fr.zip"), lang).unwrap();
let summary = writer.write_stream(["Bonjour le monde.", "Au revoir."], 1000).unwrap();
assert_eq!(summary.documents, 2);
```
!*/
use std::{
    fs::{File, OpenOptions},
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use itertools::Itertools;
use log::{debug, error, info, warn};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{
    error::Error,
    lang::LanguageTag,
    tokenize::{Document, Tokenizer, WordBoundaryTokenizer},
};

use super::chunk::{chunk_name, ChunkWriter};

/// Number of documents per chunk when nothing else is specified.
/// Should be lowered for long documents, since a reader holds a whole chunk in memory.
pub const DEFAULT_CHUNK_CAPACITY: usize = 1_000_000;

/// What has been written by [ArchiveWriter::write_stream].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub chunks: usize,
    pub documents: usize,
    /// Was writing interrupted by the stop handle?
    pub stopped: bool,
}

/// Write-once archive writer.
pub struct ArchiveWriter<T = WordBoundaryTokenizer> {
    path: PathBuf,
    language: LanguageTag,
    tokenizer: T,
    zip: ZipWriter<File>,
    stop: Arc<AtomicBool>,
}

impl ArchiveWriter<WordBoundaryTokenizer> {
    /// Create a new archive at `path`, tokenizing with [WordBoundaryTokenizer].
    ///
    /// # Errors
    /// Returns [Error::ArchiveExists] if there's already something at `path`.
    pub fn open_for_write(path: &Path, language: LanguageTag) -> Result<Self, Error> {
        Self::with_tokenizer(path, language, WordBoundaryTokenizer)
    }
}

impl<T> ArchiveWriter<T>
where
    T: Tokenizer,
{
    /// Create a new archive at `path` with a custom tokenizer.
    pub fn with_tokenizer(path: &Path, language: LanguageTag, tokenizer: T) -> Result<Self, Error> {
        let file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                error!("{:?} already exists!", path);
                return Err(Error::ArchiveExists(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        debug!("creating {language} archive at {path:?}");
        Ok(Self {
            path: path.to_path_buf(),
            language,
            tokenizer,
            zip: ZipWriter::new(file),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag that stops writing once the chunk in progress is finished.
    /// The archive is still properly closed.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tokenize and write texts, `chunk_capacity` documents per chunk.
    ///
    /// `texts` is consumed lazily and can be unbounded.
    /// A partially filled last chunk is written too.
    ///
    /// # Errors
    /// Returns [Error::InvalidChunkCapacity] if `chunk_capacity` is 0, and propagates IO/encoding errors.
    pub fn write_stream<I, S>(self, texts: I, chunk_capacity: usize) -> Result<WriteSummary, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ArchiveWriter {
            path,
            language,
            tokenizer,
            zip,
            stop,
        } = self;
        let documents = texts
            .into_iter()
            .map(|text| tokenizer.tokenize(text.as_ref(), &language));
        write_chunks(zip, &path, &language, &stop, documents, chunk_capacity)
    }

    /// Write already tokenized documents, `chunk_capacity` documents per chunk.
    pub fn write_documents<I>(self, documents: I, chunk_capacity: usize) -> Result<WriteSummary, Error>
    where
        I: IntoIterator<Item = Document>,
    {
        let ArchiveWriter {
            path,
            language,
            zip,
            stop,
            ..
        } = self;
        write_chunks(
            zip,
            &path,
            &language,
            &stop,
            documents.into_iter(),
            chunk_capacity,
        )
    }
}

fn chunk_options() -> SimpleFileOptions {
    // chunks are already snappy-compressed
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .large_file(true)
}

fn write_chunks<I>(
    mut zip: ZipWriter<File>,
    path: &Path,
    language: &LanguageTag,
    stop: &AtomicBool,
    documents: I,
    chunk_capacity: usize,
) -> Result<WriteSummary, Error>
where
    I: Iterator<Item = Document>,
{
    if chunk_capacity == 0 {
        error!("invalid chunk capacity for {path:?}");
        return Err(Error::InvalidChunkCapacity(chunk_capacity));
    }

    let mut summary = WriteSummary::default();
    let chunks = documents.chunks(chunk_capacity);

    if !stop.load(Ordering::SeqCst) {
        for (index, chunk) in (&chunks).into_iter().enumerate() {
            let name = chunk_name(language.as_str(), index);
            zip.start_file(name.as_str(), chunk_options())?;

            let mut writer = ChunkWriter::new(&mut zip);
            for document in chunk {
                writer.append(&document)?;
            }
            let nb_documents = writer.finish()?;

            info!("{path:?}: wrote chunk {name} ({nb_documents} documents)");
            summary.chunks += 1;
            summary.documents += nb_documents;

            if stop.load(Ordering::SeqCst) {
                break;
            }
        }
    }

    if stop.load(Ordering::SeqCst) {
        warn!("{path:?}: stopped after {} chunks", summary.chunks);
        summary.stopped = true;
    }

    zip.finish()?;
    info!(
        "{path:?}: wrote {} documents in {} chunks",
        summary.documents, summary.chunks
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.zip");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"precious")
            .unwrap();

        let lang = LanguageTag::parse("en").unwrap();
        match ArchiveWriter::open_for_write(&path, lang) {
            Err(Error::ArchiveExists(p)) => assert_eq!(p, path),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("existing archive has been overwritten"),
        }
        assert_eq!(std::fs::read(&path).unwrap(), b"precious");
    }

    #[test]
    fn zero_capacity() {
        let dir = tempdir().unwrap();
        let lang = LanguageTag::parse("en").unwrap();
        let writer = ArchiveWriter::open_for_write(&dir.path().join("en.zip"), lang).unwrap();
        assert!(matches!(
            writer.write_stream(["a"], 0),
            Err(Error::InvalidChunkCapacity(0))
        ));
    }

    #[test]
    fn summary() {
        let dir = tempdir().unwrap();
        let lang = LanguageTag::parse("en").unwrap();
        let writer = ArchiveWriter::open_for_write(&dir.path().join("en.zip"), lang).unwrap();
        let texts = (0..25).map(|i| format!("document number {i}"));
        let summary = writer.write_stream(texts, 10).unwrap();
        assert_eq!(
            summary,
            WriteSummary {
                chunks: 3,
                documents: 25,
                stopped: false
            }
        );
    }

    #[test]
    fn stop_before_writing() {
        let dir = tempdir().unwrap();
        let lang = LanguageTag::parse("en").unwrap();
        let writer = ArchiveWriter::open_for_write(&dir.path().join("en.zip"), lang).unwrap();
        writer.stop_handle().store(true, Ordering::SeqCst);
        let summary = writer.write_stream(["a", "b", "c"], 1).unwrap();
        assert!(summary.stopped);
        assert_eq!(summary.chunks, 0);
    }
}
