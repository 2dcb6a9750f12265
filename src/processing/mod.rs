/*! Corpus processing

Aggregation of tokenized corpora into word counts and frequency lists:

- [count]: normalized token counts of an archive, or re-normalized counts of an external list.
- [freqs]: conversion of counts into frequencies and merging of several frequency lists.
!*/
pub mod count;
pub mod freqs;

pub use count::{count_tokens, recount, TokenCounts, TOTAL_KEY};
pub use freqs::{counts_to_freqs, merge_count_files, merge_freqs, write_frequency_file, Frequencies};
