/*! Corpus sources and their languages

Each source supports a fixed list of languages. Requested languages are aligned to that list with
[match_source_language], which smooths over inconsistencies such as `nb`/`no` or `zh`/`zh-Hans`.

Some sources name languages their own way (`chi_sim` for Simplified Chinese in Google Ngrams):
[upstream_source_language] gives that name, which is only meant for fetching upstream data.
Built corpora are always named after our own codes.
!*/
use log::debug;
use phf::phf_map;

use crate::{
    error::Error,
    lang::{closest_match, LOOSE_MATCH_DISTANCE},
};

/// A corpus source.
#[derive(Debug)]
pub struct Source {
    pub name: &'static str,
    pub languages: &'static [&'static str],
    /// Our code → source code, for codes that differ.
    upstream: Option<&'static phf::Map<&'static str, &'static str>>,
}

static GOOGLE_NGRAMS_CODES: phf::Map<&'static str, &'static str> = phf_map! {
    "de" => "ger",
    "en" => "eng",
    "es" => "spa",
    "fr" => "fre",
    "he" => "heb",
    "it" => "ita",
    "ru" => "rus",
    "zh-Hans" => "chi_sim",
};

static OPENSUBTITLES_CODES: phf::Map<&'static str, &'static str> = phf_map! {
    "pt-PT" => "pt",
    "pt-BR" => "pt_br",
    "zh-Hans" => "zh_cn",
    "zh-Hant" => "zh_tw",
};

static GLOBALVOICES_CODES: phf::Map<&'static str, &'static str> = phf_map! {
    "ja" => "jp",
    "zh-Hans" => "zhs",
    "zh-Hant" => "zht",
};

// Serbo-Croatian is not split in OSCAR
static OSCAR_CODES: phf::Map<&'static str, &'static str> = phf_map! {
    "bs" => "sh",
    "hr" => "sh",
    "sr" => "sh",
};

pub static SOURCES: &[Source] = &[
    // GlobalVoices, from OPUS: languages with over 100,000 sentences
    Source {
        name: "globalvoices",
        languages: &[
            "ar", "bn", "ca", "de", "el", "en", "es", "fr", "it", "ja", "mg", "pl", "pt", "ru",
            "sw", "zh-Hans", "zh-Hant",
        ],
        upstream: Some(&GLOBALVOICES_CODES),
    },
    // Google Ngrams 2019
    Source {
        name: "google-ngrams",
        languages: &["de", "en", "es", "fr", "he", "it", "ru", "zh-Hans"],
        upstream: Some(&GOOGLE_NGRAMS_CODES),
    },
    // Jieba's built-in wordlist
    Source {
        name: "jieba",
        languages: &["zh-Hans"],
        upstream: None,
    },
    // NewsCrawl 2014
    Source {
        name: "newscrawl",
        languages: &["cs", "de", "en", "fi", "fr", "ru"],
        upstream: None,
    },
    // OpenSubtitles 2018, from OPUS: languages with at least 400 subtitle files
    Source {
        name: "opensubtitles",
        languages: &[
            "ar", "bg", "bn", "bs", "ca", "cs", "da", "de", "el", "en", "es", "et", "eu", "fa",
            "fi", "fr", "gl", "he", "hr", "hu", "id", "is", "it", "ja", "ko", "lt", "lv", "mk",
            "ml", "ms", "nl", "nb", "pl", "pt-PT", "pt-BR", "pt", "ro", "ru", "si", "sk", "sl",
            "sq", "sr", "sv", "th", "tr", "uk", "vi", "zh-Hans", "zh-Hant",
        ],
        upstream: Some(&OPENSUBTITLES_CODES),
    },
    // languages that are less than 80% correct when audited (gl, ne, mr) are left out
    Source {
        name: "oscar",
        languages: &[
            "ar", "az", "be", "bn", "bg", "bs", "ca", "cs", "da", "de", "el", "en", "es", "et",
            "fa", "fi", "fr", "gu", "he", "hi", "hr", "hu", "hy", "id", "is", "it", "ja", "ka",
            "kk", "ko", "lt", "lv", "mk", "ml", "mn", "mr", "nl", "no", "pl", "pt", "ro", "sk",
            "sl", "sq", "sr", "sv", "sw", "ta", "te", "th", "tl", "tr", "uk", "ur", "vi", "zh",
        ],
        upstream: Some(&OSCAR_CODES),
    },
    // Wikipedias with at least 100,000 articles and a depth of 20 or more,
    // then smaller high-depth ones
    Source {
        name: "wikipedia",
        languages: &[
            "ar", "bg", "bs", "ca", "cs", "cy", "da", "de", "el", "en", "eo", "es", "et", "eu",
            "fa", "fi", "fr", "gl", "he", "hi", "hu", "hr", "hy", "id", "it", "ja", "ka", "ko",
            "la", "lt", "lv", "ms", "nn", "nb", "nl", "pl", "pt", "ro", "ru", "sk", "sl", "sv",
            "sr", "ta", "th", "tr", "uk", "ur", "uz", "vi", "zh", "bn", "is", "ku", "mk", "my",
            "ml", "mn", "mr", "or", "si", "te",
        ],
        upstream: None,
    },
];

/// Get a source by name.
pub fn source(name: &str) -> Result<&'static Source, Error> {
    SOURCES
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| Error::UnknownSource {
            source: name.to_string(),
            known: SOURCES.iter().map(|s| s.name).collect(),
        })
}

impl Source {
    /// Closest supported language to `language`, see [match_source_language].
    pub fn match_language(&self, language: &str) -> Result<&'static str, Error> {
        match closest_match(language, self.languages, LOOSE_MATCH_DISTANCE) {
            Some((matched, distance)) => {
                debug!("{}: {language} → {matched} (distance {distance})", self.name);
                Ok(matched)
            }
            None => Err(Error::UnsupportedLanguage {
                source: self.name.to_string(),
                language: language.to_string(),
                supported: self.languages.to_vec(),
            }),
        }
    }

    /// Code of `language` for this source.
    pub fn upstream_language<'a>(&self, language: &'a str) -> &'a str {
        self.upstream
            .and_then(|codes| codes.get(language))
            .copied()
            .unwrap_or(language)
    }
}

/// Get the language supported by `source` that is closest to `language`.
///
/// # Errors
/// [Error::UnknownSource] if `source` does not exist,
/// [Error::UnsupportedLanguage] if nothing is close enough.
pub fn match_source_language(source_name: &str, language: &str) -> Result<&'static str, Error> {
    source(source_name)?.match_language(language)
}

/// Get the code `source` uses for `language`.
pub fn upstream_source_language<'a>(source_name: &str, language: &'a str) -> Result<&'a str, Error> {
    Ok(source(source_name)?.upstream_language(language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches() {
        assert_eq!(match_source_language("wikipedia", "fr").unwrap(), "fr");
        assert_eq!(match_source_language("opensubtitles", "pt").unwrap(), "pt");
        assert_eq!(match_source_language("opensubtitles", "pt-BR").unwrap(), "pt-BR");
    }

    #[test]
    fn close_matches() {
        assert_eq!(match_source_language("oscar", "nb").unwrap(), "no");
        assert_eq!(match_source_language("wikipedia", "no").unwrap(), "nb");
        assert_eq!(match_source_language("jieba", "zh").unwrap(), "zh-Hans");
        assert_eq!(match_source_language("google-ngrams", "iw").unwrap(), "he");
        assert_eq!(match_source_language("newscrawl", "en-GB").unwrap(), "en");
    }

    #[test]
    fn unsupported_language() {
        match match_source_language("newscrawl", "ja") {
            Err(Error::UnsupportedLanguage {
                source,
                language,
                supported,
            }) => {
                assert_eq!(source, "newscrawl");
                assert_eq!(language, "ja");
                assert_eq!(supported, vec!["cs", "de", "en", "fi", "fr", "ru"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unknown_source() {
        match match_source_language("myspace", "en") {
            Err(Error::UnknownSource { source, known }) => {
                assert_eq!(source, "myspace");
                assert!(known.contains(&"wikipedia"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn upstream_codes() {
        assert_eq!(upstream_source_language("google-ngrams", "zh-Hans").unwrap(), "chi_sim");
        assert_eq!(upstream_source_language("oscar", "hr").unwrap(), "sh");
        assert_eq!(upstream_source_language("oscar", "fr").unwrap(), "fr");
        assert_eq!(upstream_source_language("wikipedia", "fr").unwrap(), "fr");
        assert!(upstream_source_language("myspace", "fr").is_err());
    }
}
