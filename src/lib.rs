/*! # polyglot-corpus

Multilingual corpora as streams of normalized tokens.

- [normalization]: language-aware normalization of text and tokens.
- [io]: chunked archives of tokenized documents.
- [processing]: token counts and frequency lists.
- [lang], [sources], [identifiers]: language tags, corpus sources and language identification.
!*/
pub mod error;
pub mod identifiers;
pub mod io;
pub mod lang;
pub mod normalization;
pub mod processing;
pub mod sources;
pub mod tokenize;
