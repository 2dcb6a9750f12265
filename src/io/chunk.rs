//! Chunk naming and encoding.
//!
//! A chunk is an Avro object container file holding [Document] records.
//! The schema is written in the header of every chunk, so chunks can be decoded on their own.
use std::io::Read;

use avro_rs::{Codec, Schema, Writer};
use lazy_static::lazy_static;
use log::debug;

use crate::{error::Error, tokenize::Document};

/// Extension of chunk entries in the container.
pub const CHUNK_EXTENSION: &str = "avro";

/// Minimum width of the zero-padded chunk index.
/// Readers sort numerically, so archives with more chunks are still read in order.
pub const INDEX_WIDTH: usize = 6;

lazy_static! {
    pub(crate) static ref SCHEMA: Schema = {
        let token_schema = r#"
{
    "type": "record",
    "name": "token",
    "fields": [
        {"name": "text", "type": "string"},
        {"name": "space_after", "type": "boolean"}
    ]
}
"#;
        let document_schema = r#"
{
    "type": "record",
    "name": "document",
    "fields": [
        {"name": "tokens", "type": {"type": "array", "items": "token"}}
    ]
}
"#;
        Schema::parse_list(&[token_schema, document_schema])
            .expect("invalid document schema")
            .pop()
            .expect("empty schema list")
    };
}

/// Name of the chunk of index `index` for `language`: `{language}_{index:06}.avro`.
pub fn chunk_name(language: &str, index: usize) -> String {
    format!(
        "{language}_{index:0width$}.{CHUNK_EXTENSION}",
        width = INDEX_WIDTH
    )
}

/// Index of a chunk of `language` from its name, `None` if the name is not one of such chunks.
///
/// Any number of digits is accepted.
pub fn parse_chunk_name(name: &str, language: &str) -> Option<usize> {
    let digits = name
        .strip_prefix(language)?
        .strip_prefix('_')?
        .strip_suffix(CHUNK_EXTENSION)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Avro writer of a single chunk.
pub(crate) struct ChunkWriter<'a, W>
where
    W: std::io::Write,
{
    writer: Writer<'a, W>,
    documents: usize,
}

impl<W> ChunkWriter<'static, W>
where
    W: std::io::Write,
{
    pub fn new(writer: W) -> Self {
        Self::with_codec(writer, Codec::Snappy)
    }

    pub fn with_codec(writer: W, codec: Codec) -> Self {
        Self {
            writer: Writer::with_codec(&SCHEMA, writer, codec),
            documents: 0,
        }
    }
}

impl<'a, W> ChunkWriter<'a, W>
where
    W: std::io::Write,
{
    pub fn append(&mut self, document: &Document) -> Result<(), Error> {
        self.writer.append_ser(document)?;
        self.documents += 1;
        Ok(())
    }

    /// Flush pending blocks and return the number of documents written.
    pub fn finish(mut self) -> Result<usize, Error> {
        self.writer.flush()?;
        Ok(self.documents)
    }
}

/// Decode a whole chunk.
pub(crate) fn decode_chunk<R: Read>(reader: R) -> Result<Vec<Document>, Error> {
    let reader = avro_rs::Reader::new(reader)?;
    let documents = reader
        .map(|record| {
            let record = record?;
            avro_rs::from_value::<Document>(&record).map_err(Error::from)
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("decoded {} documents", documents.len());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::tokenize::Token;

    use super::*;

    #[test]
    fn names() {
        assert_eq!(chunk_name("en", 0), "en_000000.avro");
        assert_eq!(chunk_name("zh-Hans", 42), "zh-Hans_000042.avro");
        assert_eq!(chunk_name("fr", 12_345_678), "fr_12345678.avro");
    }

    #[test]
    fn parse_names() {
        assert_eq!(parse_chunk_name("en_000012.avro", "en"), Some(12));
        assert_eq!(parse_chunk_name("en_012.avro", "en"), Some(12));
        assert_eq!(parse_chunk_name("en_1234567.avro", "en"), Some(1_234_567));
        assert_eq!(parse_chunk_name("en_000012.spacy", "en"), None);
        assert_eq!(parse_chunk_name("fr_000012.avro", "en"), None);
        assert_eq!(parse_chunk_name("en-GB_000012.avro", "en"), None);
        assert_eq!(parse_chunk_name("en_.avro", "en"), None);
        assert_eq!(parse_chunk_name("en_+12.avro", "en"), None);
    }

    #[test]
    fn names_roundtrip() {
        for index in [0, 7, 999, 1000, 999_999, 1_000_000] {
            assert_eq!(parse_chunk_name(&chunk_name("sr", index), "sr"), Some(index));
        }
    }

    #[test]
    fn chunk_is_self_describing() {
        let documents = vec![
            Document::new(vec![Token::new("Hello", false), Token::new(",", true)]),
            Document::default(),
            Document::new(vec![Token::new("Ljubljana", false)]),
        ];

        let mut buf = Vec::new();
        let mut writer = ChunkWriter::with_codec(&mut buf, Codec::Null);
        for doc in &documents {
            writer.append(doc).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), 3);

        let decoded = decode_chunk(Cursor::new(&buf)).unwrap();
        assert_eq!(decoded, documents);
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(decode_chunk(Cursor::new(b"definitely not avro".to_vec())).is_err());
    }
}
