//! Normalization profiles.
//!
//! A [NormalizationProfile] is a pure function of a language tag, so resolved
//! profiles can be memoized in a [ProfileCache].
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use icu_locale::subtags::Script;
use log::debug;

use crate::lang::{self, DEFAULT_MATCH_DISTANCE};

use super::transliterate::Transliteration;

/// Scripts that are cased and alphabetic, and get the lighter NFC normalization.
const CASED_SCRIPTS: [&str; 3] = ["Latn", "Grek", "Cyrl"];

/// Unicode normal form to apply before anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalForm {
    Nfc,
    Nfkc,
}

/// Preferred diacritic under `s` and `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiacriticsUnder {
    #[default]
    None,
    /// `ș` → `ş`, `ț` → `ţ` (Turkish and related languages).
    Cedillas,
    /// `ş` → `ș`, `ţ` → `ț` (Romanian).
    Commas,
}

/// How text in a given language has to be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizationProfile {
    /// Likely script of the language, if known.
    pub script: Option<Script>,
    pub normal_form: NormalForm,
    /// Is `ı` the lowercase of `I`?
    pub dotless_i: bool,
    pub diacritics_under: DiacriticsUnder,
    pub transliteration: Option<Transliteration>,
}

impl Default for NormalizationProfile {
    fn default() -> Self {
        Self {
            script: None,
            normal_form: NormalForm::Nfkc,
            dotless_i: false,
            diacritics_under: DiacriticsUnder::None,
            transliteration: None,
        }
    }
}

/// Resolve the profile of `language`. Never fails: unknown or unparseable tags get the default profile.
pub fn resolve(language: &str) -> NormalizationProfile {
    resolve_with_distance(language, DEFAULT_MATCH_DISTANCE)
}

/// Same as [resolve], with a custom matching tolerance for language-specific rules.
pub fn resolve_with_distance(language: &str, max_distance: u16) -> NormalizationProfile {
    let mut profile = NormalizationProfile {
        script: lang::maximize(language).and_then(|id| id.script),
        ..Default::default()
    };

    if profile
        .script
        .map_or(false, |s| CASED_SCRIPTS.contains(&s.as_str()))
    {
        profile.normal_form = NormalForm::Nfc;
    }

    let in_list = |targets: &[&str]| lang::language_in_list(language, targets, max_distance);

    if in_list(&["tr", "az", "kk"]) {
        profile.dotless_i = true;
        profile.diacritics_under = DiacriticsUnder::Cedillas;
    } else if in_list(&["ro"]) {
        profile.diacritics_under = DiacriticsUnder::Commas;
    }

    profile.transliteration = if in_list(&["sr"]) {
        Some(Transliteration::SerbianLatin)
    } else if in_list(&["az"]) {
        Some(Transliteration::AzerbaijaniLatin)
    } else if in_list(&["kk"]) {
        Some(Transliteration::KazakhLatin)
    } else {
        None
    };

    debug!("resolved profile for {language:?}: {profile:?}");
    profile
}

/// Memoizes resolved profiles by input tag.
///
/// Concurrent misses on the same tag may both resolve it: results are identical,
/// so the last insert wins without harm.
#[derive(Debug)]
pub struct ProfileCache {
    profiles: RwLock<HashMap<String, NormalizationProfile>>,
    max_distance: u16,
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_DISTANCE)
    }
}

impl ProfileCache {
    pub fn new(max_distance: u16) -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            max_distance,
        }
    }

    /// Get the cached profile of `language`, resolving it on the first call.
    pub fn get(&self, language: &str) -> NormalizationProfile {
        let cached = self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(language)
            .copied();
        if let Some(profile) = cached {
            return profile;
        }

        let profile = resolve_with_distance(language, self.max_distance);
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(language.to_string(), profile);
        profile
    }

    /// Number of cached profiles.
    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
