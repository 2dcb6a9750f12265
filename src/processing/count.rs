/*! Token counting

Counts are written in the frequency-list text format: a `__total__\t<count>` line,
then one `<token>\t<count>` line per token, most frequent first.
!*/
use std::{
    collections::HashMap,
    io::{BufRead, Write},
};

use log::{debug, info};
use rayon::prelude::*;

use crate::{
    error::Error,
    io::ArchiveReader,
    lang::LanguageTag,
    normalization::Normalizer,
    tokenize::{Document, Tokenizer},
};

/// Key of the total count line.
pub const TOTAL_KEY: &str = "__total__";

/// Counts of normalized tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounts {
    counts: HashMap<String, u64>,
    total: u64,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `token`. Empty tokens are ignored.
    pub fn add(&mut self, token: String, count: u64) {
        if token.is_empty() {
            return;
        }
        *self.counts.entry(token).or_insert(0) += count;
        self.total += count;
    }

    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tokens by descending count, ties broken by token.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        sorted.sort_unstable_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then_with(|| ta.cmp(tb)));
        sorted
    }

    /// Write the total, then tokens seen at least `min_count` times.
    ///
    /// The total always accounts for every token, written or not.
    pub fn write_to<W: Write>(&self, mut writer: W, min_count: u64) -> Result<(), Error> {
        writeln!(writer, "{TOTAL_KEY}\t{}", self.total)?;
        for (token, count) in self.sorted() {
            if count < min_count {
                break;
            }
            writeln!(writer, "{token}\t{count}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Normalize the tokens of a document, dropping the ones that normalize to nothing.
fn normalized_tokens(document: &Document, language: &str, normalizer: &Normalizer) -> Vec<String> {
    document
        .tokens()
        .iter()
        .map(|token| normalizer.normalize_token(&token.text, language))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Count normalized tokens of every document of an archive.
///
/// Chunks are read one after the other, documents of a chunk are normalized in parallel.
pub fn count_tokens(reader: &ArchiveReader, normalizer: &Normalizer) -> Result<TokenCounts, Error> {
    let language = reader.language().as_str();
    let mut counts = TokenCounts::new();

    for chunk in reader.list_chunks()? {
        let documents: Vec<Document> = reader.iterate_chunk(&chunk)?.collect();
        let tokens: Vec<Vec<String>> = documents
            .par_iter()
            .map(|document| normalized_tokens(document, language, normalizer))
            .collect();

        for token in tokens.into_iter().flatten() {
            counts.add(token, 1);
        }
        debug!(
            "counted chunk {chunk} ({} documents, {} distinct tokens so far)",
            documents.len(),
            counts.len()
        );
    }

    info!(
        "[{language}] counted {} tokens ({} distinct)",
        counts.total(),
        counts.len()
    );
    Ok(counts)
}

/// Make counts from another source consistent with our tokenization and normalization.
///
/// Each `text\tcount` line is tokenized, and each resulting token gets `count`.
/// An existing `__total__` line is ignored: the total is recomputed.
pub fn recount<R, T>(
    input: R,
    language: &LanguageTag,
    tokenizer: &T,
    normalizer: &Normalizer,
) -> Result<TokenCounts, Error>
where
    R: BufRead,
    T: Tokenizer,
{
    let mut counts = TokenCounts::new();
    for line in input.lines() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with(TOTAL_KEY) {
            continue;
        }

        let (text, count) = line
            .split_once('\t')
            .ok_or_else(|| Error::MalformedCountLine(line.to_string()))?;
        let count: u64 = count
            .trim()
            .parse()
            .map_err(|_| Error::MalformedCountLine(line.to_string()))?;

        let document = tokenizer.tokenize(text, language);
        for token in normalized_tokens(&document, language.as_str(), normalizer) {
            counts.add(token, count);
        }
    }
    Ok(counts)
}
