//! # polyglot-corpus
//!
//! Builds multilingual corpora as chunked archives of tokenized documents, and word frequency lists from them.
//!
//! ## Getting started
//!
//! ```sh
//! polyglot-corpus 0.1.0
//! multilingual corpus building and word frequency tool.
//!
//! USAGE:
//!     polyglot-corpus <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     chunks             List the chunks of an archive
//!     count              Count normalized tokens of an archive
//!     help               Prints this message or the help of the given subcommand(s)
//!     identify           Identify the language of lines from stdin
//!     merge              Merge count lists into a frequency list
//!     normalize          Normalize lines from stdin
//!     recount            Normalize an external count list
//!     source-language    Get the language code to use for a corpus source
//!     tokenize           Tokenize lines from stdin into a chunked archive
//! ```
//!
//! A typical run:
//!
//! ```sh
//! zcat fr.txt.gz | polyglot-corpus tokenize fr fr.zip -s 100000
//! polyglot-corpus count fr fr.zip fr.counts.txt
//! polyglot-corpus merge fr.freqs.txt fr.counts.txt wiki.counts.txt subs.counts.txt
//! ```
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use log::{debug, error, info};
use polyglot_corpus::{
    error::Error,
    identifiers::{FastText, Identifier},
    io::{ArchiveReader, ArchiveWriter},
    normalization::{Normalizer, ProfileCache},
    processing::{count_tokens, merge_count_files, recount},
    sources,
    tokenize::{prepare_lines, Tokenizer, WordBoundaryTokenizer},
};
use structopt::StructOpt;

mod cli;

/// Lines of stdin, stopping at the first read error.
fn stdin_lines() -> impl Iterator<Item = String> {
    io::stdin().lock().lines().map_while(|line| match line {
        Ok(line) => Some(line),
        Err(e) => {
            error!("could not read from stdin: {e}");
            None
        }
    })
}

fn tokenize(t: cli::Tokenize) -> Result<(), Error> {
    let writer = ArchiveWriter::open_for_write(&t.dst, t.lang)?;

    let texts = prepare_lines(stdin_lines(), t.max_line_length, !t.no_repair);
    let summary = writer.write_stream(texts, t.chunk_size)?;
    info!(
        "{:?}: {} documents in {} chunks",
        t.dst, summary.documents, summary.chunks
    );
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, Error> {
    Ok(BufWriter::new(File::create(path)?))
}

fn count(c: cli::Count) -> Result<(), Error> {
    let reader = ArchiveReader::open(&c.src, c.lang)?;
    let normalizer = Normalizer::with_cache(ProfileCache::new(c.max_distance));
    let counts = count_tokens(&reader, &normalizer)?;
    counts.write_to(create(&c.dst)?, c.min_count)
}

fn recount_list(r: cli::Recount) -> Result<(), Error> {
    let input = BufReader::new(File::open(&r.src)?);
    let counts = recount(input, &r.lang, &WordBoundaryTokenizer, &Normalizer::new())?;
    counts.write_to(create(&r.dst)?, 1)
}

fn normalize(n: cli::Normalize) -> Result<(), Error> {
    let normalizer = Normalizer::new();
    let lang = n.lang.as_str();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for line in stdin_lines() {
        if n.tokens {
            for token in WordBoundaryTokenizer.tokenize(&line, &n.lang).tokens() {
                let token = normalizer.normalize_token(&token.text, lang);
                if !token.is_empty() {
                    writeln!(out, "{token}")?;
                }
            }
        } else {
            writeln!(out, "{}", normalizer.normalize(&line, lang))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn chunks(c: cli::Chunks) -> Result<(), Error> {
    let reader = ArchiveReader::open(&c.src, c.lang)?;
    for name in reader.list_chunks()? {
        if c.count {
            println!("{name}\t{}", reader.iterate_chunk(&name)?.len());
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

fn identify(i: cli::Identify) -> Result<(), Error> {
    let classifier = FastText::new(&i.lid_path, i.threshold)?;
    for line in stdin_lines() {
        match classifier.identify(line.as_str())? {
            Some(id) => println!("{}\t{:.3}", id.label(), id.prob()),
            None => println!("und\t0"),
        }
    }
    Ok(())
}

fn source_language(s: cli::SourceLanguage) -> Result<(), Error> {
    let matched = sources::match_source_language(&s.source, &s.lang)?;
    if s.upstream {
        println!("{}", sources::upstream_source_language(&s.source, matched)?);
    } else {
        println!("{matched}");
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::PolyglotCorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::PolyglotCorpus::Tokenize(t) => tokenize(t)?,
        cli::PolyglotCorpus::Count(c) => count(c)?,
        cli::PolyglotCorpus::Recount(r) => recount_list(r)?,
        cli::PolyglotCorpus::Merge(m) => merge_count_files(&m.src, &m.dst)?,
        cli::PolyglotCorpus::Normalize(n) => normalize(n)?,
        cli::PolyglotCorpus::Chunks(c) => chunks(c)?,
        cli::PolyglotCorpus::Identify(i) => identify(i)?,
        cli::PolyglotCorpus::SourceLanguage(s) => source_language(s)?,
    };
    Ok(())
}
