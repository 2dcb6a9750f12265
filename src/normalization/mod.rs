/*! Language-aware token normalization

Normalization puts forms of a word that should be counted together into one standard form.
What exactly happens depends on the [NormalizationProfile] of the language:

- [profile]: resolution of a language tag into a [NormalizationProfile], and its cache.
- [transliterate]: Cyrillic to Latin tables for Serbian, Azerbaijani and Kazakh.
- [text]: the normalization pipeline itself ([Normalizer], [normalize]).
- [shape]: generalization of numbers into their shape (`24,601` → `NUM:##,###`).

```
use polyglot_corpus::normalization::{normalize, Normalizer};

assert_eq!(normalize("HAKKINDA İSTANBUL", "tr"), "hakkında istanbul");

let normalizer = Normalizer::new();
assert_eq!(normalizer.normalize_token("24,601", "en"), "NUM:##,###");
```
!*/
pub mod profile;
pub mod shape;
pub mod text;
pub mod transliterate;

pub use profile::{resolve, DiacriticsUnder, NormalForm, NormalizationProfile, ProfileCache};
pub use shape::generalize;
pub use text::{normalize, normalize_with_profile, Normalizer};
pub use transliterate::{transliterate, Transliteration};
