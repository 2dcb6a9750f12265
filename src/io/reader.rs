/*! Archive reading.

The container is only opened inside of methods, so an [ArchiveReader] is cheap to keep around
and every call to [ArchiveReader::iterate] starts over from the first chunk.
Only one decoded chunk is held in memory at a time.
!*/
use std::{
    collections::VecDeque,
    fs::File,
    io::{Read, Seek},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use zip::ZipArchive;

use crate::{error::Error, lang::LanguageTag, tokenize::Document};

use super::chunk::{decode_chunk, parse_chunk_name};

#[derive(Debug, Clone)]
pub struct ArchiveReader {
    path: PathBuf,
    language: LanguageTag,
}

impl ArchiveReader {
    /// Open the archive at `path`, holding chunks of `language`.
    ///
    /// # Errors
    /// Fails if `path` can't be opened or is not a valid container.
    pub fn open(path: &Path, language: LanguageTag) -> Result<Self, Error> {
        let archive = ZipArchive::new(File::open(path)?)?;
        debug!("opened {path:?} ({} entries)", archive.len());
        Ok(Self {
            path: path.to_path_buf(),
            language,
        })
    }

    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn archive(&self) -> Result<ZipArchive<File>, Error> {
        Ok(ZipArchive::new(File::open(&self.path)?)?)
    }

    /// Names of the chunks, in write order.
    pub fn list_chunks(&self) -> Result<Vec<String>, Error> {
        let archive = self.archive()?;
        Ok(sorted_chunks(&archive, self.language.as_str()))
    }

    /// Documents of a single chunk.
    ///
    /// # Errors
    /// Returns [Error::ChunkDecode] if the chunk is corrupted.
    pub fn iterate_chunk(&self, name: &str) -> Result<std::vec::IntoIter<Document>, Error> {
        let mut archive = self.archive()?;
        read_chunk(&mut archive, name).map(Vec::into_iter)
    }

    /// Documents of all chunks, in write order.
    ///
    /// Iteration stops after the first error.
    pub fn iterate(&self) -> Result<Documents, Error> {
        let archive = self.archive()?;
        let chunks = sorted_chunks(&archive, self.language.as_str()).into();
        Ok(Documents {
            archive,
            chunks,
            current: Vec::new().into_iter(),
            failed: false,
        })
    }
}

/// Chunk names sorted by their numeric index.
fn sorted_chunks<R>(archive: &ZipArchive<R>, language: &str) -> Vec<String>
where
    R: Read + Seek,
{
    let mut chunks: Vec<(usize, &str)> = archive
        .file_names()
        .filter_map(|name| match parse_chunk_name(name, language) {
            Some(index) => Some((index, name)),
            None => {
                warn!("skipping {name:?}: not a chunk of {language}");
                None
            }
        })
        .collect();
    chunks.sort_unstable();
    chunks.into_iter().map(|(_, name)| name.to_string()).collect()
}

fn read_chunk<R>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<Document>, Error>
where
    R: Read + Seek,
{
    let mut entry = archive.by_name(name)?;
    debug!("reading chunk {name} ({} bytes)", entry.size());

    let mut bytes = Vec::new();
    let decoded = entry
        .read_to_end(&mut bytes)
        .map_err(Error::from)
        .and_then(|_| decode_chunk(bytes.as_slice()));

    decoded.map_err(|e| Error::ChunkDecode {
        chunk: name.to_string(),
        source: Box::new(e),
    })
}

/// Iterator over the documents of an archive. See [ArchiveReader::iterate].
pub struct Documents {
    archive: ZipArchive<File>,
    chunks: VecDeque<String>,
    current: std::vec::IntoIter<Document>,
    failed: bool,
}

impl Iterator for Documents {
    type Item = Result<Document, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(document) = self.current.next() {
                return Some(Ok(document));
            }
            if self.failed {
                return None;
            }

            let name = self.chunks.pop_front()?;
            match read_chunk(&mut self.archive, &name) {
                Ok(documents) => self.current = documents.into_iter(),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
