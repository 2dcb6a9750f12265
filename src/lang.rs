//! Language tags and language matching.
//!
//! Tags are parsed and case-normalized with [oxilangtag]. Matching works on
//! *maximized* identifiers: aliases are canonicalized (`iw` → `he`, `sh` → `sr-Latn`)
//! and likely subtags are added (`sr` → `sr-Cyrl-RS`) with ICU4X data, then
//! [distance] compares them subtag by subtag.
//!
//! | desired   | supported | distance | match at [DEFAULT_MATCH_DISTANCE] |
//! |-----------|-----------|----------|------------------------------------|
//! | `tr`      | `tr`      | 0        | yes                                |
//! | `tr-CY`   | `tr`      | 4        | yes                                |
//! | `sr-Latn` | `sr`      | 5        | yes                                |
//! | `az-IR`   | `az`      | 9        | yes (script + region)              |
//! | `nb`      | `no`      | ≤ 1      | yes                                |
//! | `hr`      | `sr`      | 109      | no                                 |
//! | `azb`     | `az`      | 109      | no                                 |
use std::{fmt, str::FromStr};

use icu_locale::{LanguageIdentifier, Locale, LocaleCanonicalizer, LocaleExpander};
use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default tolerance of [language_in_list]: admits script, regional and
/// orthographic variants, but never a different language.
pub const DEFAULT_MATCH_DISTANCE: u16 = 10;

/// Tolerance used to align a language to the languages a resource supports.
pub const LOOSE_MATCH_DISTANCE: u16 = 25;

const LANGUAGE_MISMATCH: u16 = 100;
const MACROLANGUAGE_MISMATCH: u16 = 4;
const SCRIPT_MISMATCH: u16 = 5;
const REGION_MISMATCH: u16 = 4;
const VARIANT_MISMATCH: u16 = 1;

/// (individual language, macrolanguage, distance) of languages that are close enough to be matched.
/// Individual languages that are the usual meaning of their macrolanguage are the closest.
const MACROLANGUAGES: &[(&str, &str, u16)] = &[
    ("nb", "no", 1),
    ("nn", "no", MACROLANGUAGE_MISMATCH),
    ("azj", "az", MACROLANGUAGE_MISMATCH),
    ("zsm", "ms", 1),
    ("arb", "ar", 1),
    ("cmn", "zh", 1),
    ("ekk", "et", 1),
    ("lvs", "lv", 1),
    ("pes", "fa", MACROLANGUAGE_MISMATCH),
    ("swh", "sw", 1),
    ("uzn", "uz", 1),
    ("khk", "mn", 1),
    ("plt", "mg", 1),
];

lazy_static! {
    static ref EXPANDER: LocaleExpander = LocaleExpander::new_extended();
    static ref CANONICALIZER: LocaleCanonicalizer = LocaleCanonicalizer::new_extended();
}

/// Normalized BCP 47 language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageTag(oxilangtag::LanguageTag<String>);

impl LanguageTag {
    /// Parse and normalize the case of a tag (`EN-us` → `en-US`).
    /// Underscores are accepted as separators (`zh_Hant` → `zh-Hant`).
    pub fn parse(tag: &str) -> Result<Self, Error> {
        let tag = tag.trim().replace('_', "-");
        oxilangtag::LanguageTag::parse_and_normalize(&tag)
            .map(Self)
            .map_err(|e| Error::InvalidLanguageTag(tag, e))
    }

    /// The `und` tag.
    pub fn undetermined() -> Self {
        // "und" is always well-formed.
        Self(
            oxilangtag::LanguageTag::parse("und".to_string())
                .unwrap_or_else(|_| unreachable!("und is a valid tag")),
        )
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn primary_language(&self) -> &str {
        self.0.primary_language()
    }

    /// See [maximize].
    pub fn maximized(&self) -> Option<LanguageIdentifier> {
        maximize(self.as_str())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Canonicalize `tag` and fill in its likely script and region.
///
/// Returns `None` when the tag can't be parsed as a locale.
/// Languages without likely subtags data are returned canonicalized but without a script.
pub fn maximize(tag: &str) -> Option<LanguageIdentifier> {
    let mut locale = canonical_locale(tag)?;
    EXPANDER.maximize(&mut locale.id);
    Some(locale.id)
}

/// [maximize], except that undetermined tags give `None`.
fn maximize_determined(tag: &str) -> Option<LanguageIdentifier> {
    let mut locale = canonical_locale(tag)?;
    if locale.id.language.is_unknown() {
        return None;
    }
    EXPANDER.maximize(&mut locale.id);
    Some(locale.id)
}

fn canonical_locale(tag: &str) -> Option<Locale> {
    let tag = tag.trim().replace('_', "-");
    let mut locale = match Locale::try_from_str(&tag) {
        Ok(locale) => locale,
        Err(e) => {
            debug!("could not parse {tag:?} as a locale: {e:?}");
            return None;
        }
    };
    CANONICALIZER.canonicalize(&mut locale);
    Some(locale)
}

/// Distance between two maximized identifiers. `0` means identical.
pub fn distance(desired: &LanguageIdentifier, supported: &LanguageIdentifier) -> u16 {
    let mut distance = 0;

    if desired.language != supported.language {
        let pair = (desired.language.as_str(), supported.language.as_str());
        distance += MACROLANGUAGES
            .iter()
            .find(|&&(a, b, _)| (a, b) == pair || (b, a) == pair)
            .map_or(LANGUAGE_MISMATCH, |&(_, _, d)| d);
    }
    if desired.script != supported.script {
        distance += SCRIPT_MISMATCH;
    }
    if desired.region != supported.region {
        distance += REGION_MISMATCH;
    }
    if desired.variants != supported.variants {
        distance += VARIANT_MISMATCH;
    }
    distance
}

/// Distance between two tags, or `None` if one of them is undetermined or unparseable.
pub fn tag_distance(desired: &str, supported: &str) -> Option<u16> {
    let desired = maximize_determined(desired)?;
    let supported = maximize(supported)?;
    Some(distance(&desired, &supported))
}

/// Find the closest of `supported` to `desired`, as long as it is at most `max_distance` away.
///
/// A candidate identical to `desired` always wins; other ties go to the earliest candidate.
pub fn closest_match<'a, S: AsRef<str>>(
    desired: &str,
    supported: &'a [S],
    max_distance: u16,
) -> Option<(&'a str, u16)> {
    if desired.eq_ignore_ascii_case("und") {
        return None;
    }
    if let Some(exact) = supported
        .iter()
        .map(AsRef::as_ref)
        .find(|candidate| candidate.eq_ignore_ascii_case(desired))
    {
        return Some((exact, 0));
    }

    let desired = maximize_determined(desired)?;
    let mut best: Option<(&'a str, u16)> = None;
    for candidate in supported {
        let candidate = candidate.as_ref();
        let d = match maximize(candidate) {
            Some(maximized) => distance(&desired, &maximized),
            None => continue,
        };
        if d <= max_distance && best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((candidate, d));
        }
    }
    best
}

/// Does `language` match one of `targets` within `max_distance`?
pub fn language_in_list(language: &str, targets: &[&str], max_distance: u16) -> bool {
    closest_match(language, targets, max_distance).is_some()
}
