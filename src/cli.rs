//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use polyglot_corpus::{
    io::DEFAULT_CHUNK_CAPACITY, lang::LanguageTag, lang::DEFAULT_MATCH_DISTANCE,
    tokenize::MAX_LINE_LENGTH,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "polyglot-corpus",
    about = "multilingual corpus building and word frequency tool."
)]
/// Holds every command that is callable by the `polyglot-corpus` command.
pub enum PolyglotCorpus {
    #[structopt(about = "Tokenize lines from stdin into a chunked archive")]
    Tokenize(Tokenize),
    #[structopt(about = "Count normalized tokens of an archive")]
    Count(Count),
    #[structopt(about = "Normalize an external count list")]
    Recount(Recount),
    #[structopt(about = "Merge count lists into a frequency list")]
    Merge(Merge),
    #[structopt(about = "Normalize lines from stdin")]
    Normalize(Normalize),
    #[structopt(about = "List the chunks of an archive")]
    Chunks(Chunks),
    #[structopt(about = "Identify the language of lines from stdin")]
    Identify(Identify),
    #[structopt(about = "Get the language code to use for a corpus source")]
    SourceLanguage(SourceLanguage),
}

#[derive(Debug, StructOpt)]
/// Tokenize command and parameters.
///
/// Reads documents (one per line) from stdin.
pub struct Tokenize {
    #[structopt(help = "language of the documents")]
    pub lang: LanguageTag,
    #[structopt(parse(from_os_str), help = "archive destination (must not exist)")]
    pub dst: PathBuf,
    #[structopt(
        long = "chunk-size",
        short = "s",
        help = "number of documents per chunk",
        default_value = "1000000"
    )]
    pub chunk_size: usize,
    #[structopt(
        long = "max-line-length",
        help = "skip lines of this length or longer",
        default_value = "1000000"
    )]
    pub max_line_length: usize,
    #[structopt(long = "no-repair", help = "do not decode HTML entities")]
    pub no_repair: bool,
}

#[derive(Debug, StructOpt)]
pub struct Count {
    #[structopt(help = "language of the archive")]
    pub lang: LanguageTag,
    #[structopt(parse(from_os_str), help = "source archive")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination count list")]
    pub dst: PathBuf,
    #[structopt(
        long = "min-count",
        help = "only write tokens seen at least this many times",
        default_value = "2"
    )]
    pub min_count: u64,
    #[structopt(
        long = "max-distance",
        help = "language distance tolerance of language-specific rules",
        default_value = "10"
    )]
    pub max_distance: u16,
}

#[derive(Debug, StructOpt)]
pub struct Recount {
    #[structopt(help = "language of the count list")]
    pub lang: LanguageTag,
    #[structopt(parse(from_os_str), help = "source count list")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination count list")]
    pub dst: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Merge {
    #[structopt(parse(from_os_str), help = "destination frequency list")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        required = true,
        min_values = 3,
        help = "count lists to merge (at least 3)"
    )]
    pub src: Vec<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct Normalize {
    #[structopt(help = "language of the text")]
    pub lang: LanguageTag,
    #[structopt(
        long = "tokens",
        short = "t",
        help = "tokenize lines and print one normalized token per line"
    )]
    pub tokens: bool,
}

#[derive(Debug, StructOpt)]
pub struct Chunks {
    #[structopt(help = "language of the archive")]
    pub lang: LanguageTag,
    #[structopt(parse(from_os_str), help = "archive")]
    pub src: PathBuf,
    #[structopt(long = "count", short = "c", help = "also print document counts")]
    pub count: bool,
}

#[derive(Debug, StructOpt)]
pub struct Identify {
    #[structopt(
        parse(from_os_str),
        long = "lid-path",
        help = "Path to lid.176.ftz",
        default_value = "lid.176.ftz"
    )]
    pub lid_path: PathBuf,
    #[structopt(
        long = "threshold",
        help = "minimum confidence of an identification",
        default_value = "0.0"
    )]
    pub threshold: f32,
}

#[derive(Debug, StructOpt)]
pub struct SourceLanguage {
    #[structopt(help = "source name (wikipedia, oscar, ...)")]
    pub source: String,
    #[structopt(help = "requested language")]
    pub lang: String,
    #[structopt(long = "upstream", short = "u", help = "print the code used by the source")]
    pub upstream: bool,
}

// keep default values in sync with the library constants
const _: () = {
    assert!(DEFAULT_CHUNK_CAPACITY == 1_000_000);
    assert!(MAX_LINE_LENGTH == 1_000_000);
    assert!(DEFAULT_MATCH_DISTANCE == 10);
};
