/*!
# Chunked document archives

Tokenized documents are stored in zip containers, in chunks named `{language}_{index}.avro`
(see [chunk_name]). Each chunk is a self-describing Avro file holding a bounded number of documents.

- [ArchiveWriter] writes an archive from a (possibly unbounded) stream of texts.
- [ArchiveReader] lists chunks and reads documents back, one chunk at a time.

Archives are write-once: there is no way to update or remove a chunk.
!*/
mod chunk;
pub mod reader;
pub mod writer;

pub use chunk::{chunk_name, parse_chunk_name, CHUNK_EXTENSION, INDEX_WIDTH};
pub use reader::{ArchiveReader, Documents};
pub use writer::{ArchiveWriter, WriteSummary, DEFAULT_CHUNK_CAPACITY};
