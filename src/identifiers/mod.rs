/*! Language identification models

Holds an [Identifier] trait for implementing other ones.

The current identifier used is [fasttext](https://fasttext.cc), whose labels are aligned to a list of supported languages.
!*/
mod fasttext;
mod identifier;

pub use self::fasttext::{align_language, FastText, SUPPORTED_LANGUAGES};
pub use identifier::{clean_text, Identification, Identifier};
