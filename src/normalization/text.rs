//! Text normalization pipeline.
//!
//! Steps run in this order, only some of them applying to a given language:
//!
//! 1. line breaks and tabs become spaces, surrounding whitespace is trimmed
//! 2. NFC or NFKC normalization
//! 3. transliteration of multi-script languages
//! 4. removal of abjad marks and tatweels
//! 5. case folding, with Turkish-style dotted/dotless `i` where relevant
//! 6. correction of diacritics under `s` and `t`
//! 7. curly quotes become straight
//!
//! Transliteration needs canonically ordered input, and diacritic correction
//! only targets lowercase letters: the order matters.
use std::borrow::Cow;

use icu_casemap::CaseMapper;
use icu_normalizer::{ComposingNormalizer, ComposingNormalizerBorrowed};
use lazy_static::lazy_static;

use super::{
    profile::{DiacriticsUnder, NormalForm, NormalizationProfile, ProfileCache},
    shape::generalize,
};

lazy_static! {
    static ref NFC: ComposingNormalizerBorrowed<'static> = ComposingNormalizer::new_nfc();
    static ref NFKC: ComposingNormalizerBorrowed<'static> = ComposingNormalizer::new_nfkc();
}

const ARABIC_TATWEEL: char = '\u{0640}';

/// Normalizes text, caching the profile of each language it sees.
#[derive(Debug, Default)]
pub struct Normalizer {
    profiles: ProfileCache,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing cache (possibly with a custom matching distance).
    pub fn with_cache(profiles: ProfileCache) -> Self {
        Self { profiles }
    }

    pub fn profile(&self, language: &str) -> NormalizationProfile {
        self.profiles.get(language)
    }

    /// Normalize `text` as written in `language`.
    pub fn normalize(&self, text: &str, language: &str) -> String {
        normalize_with_profile(text, &self.profiles.get(language))
    }

    /// Normalize a token, then replace numbers by their shape (see [generalize]).
    pub fn normalize_token(&self, text: &str, language: &str) -> String {
        let normalized = self.normalize(text, language);
        match generalize(&normalized) {
            Cow::Borrowed(_) => normalized,
            Cow::Owned(shape) => shape,
        }
    }
}

/// Normalize `text` as written in `language`, without caching the resolved profile.
pub fn normalize(text: &str, language: &str) -> String {
    normalize_with_profile(text, &super::profile::resolve(language))
}

/// Run the whole pipeline with an already resolved profile.
pub fn normalize_with_profile(text: &str, profile: &NormalizationProfile) -> String {
    let text = flatten_whitespace(text);
    let text = unicode_normalize(&text, profile.normal_form);
    let text = match profile.transliteration {
        Some(table) => table.apply(&text),
        None => Cow::Borrowed(&*text),
    };
    let text = remove_marks(&text);
    let text = if profile.dotless_i {
        casefold_with_i_dots(&text)
    } else {
        casefold(&text)
    };
    let text = match profile.diacritics_under {
        DiacriticsUnder::Commas => cedillas_to_commas(&text),
        DiacriticsUnder::Cedillas => commas_to_cedillas(&text),
        DiacriticsUnder::None => Cow::Borrowed(text.as_str()),
    };
    uncurl_quotes(&text).into_owned()
}

/// Replace newlines and tabs with spaces and trim the result.
pub fn flatten_whitespace(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\t']) {
        Cow::Owned(text.replace(['\n', '\t'], " ").trim().to_string())
    } else {
        Cow::Borrowed(text.trim())
    }
}

pub fn unicode_normalize(text: &str, form: NormalForm) -> Cow<'_, str> {
    match form {
        NormalForm::Nfc => NFC.normalize(text),
        NormalForm::Nfkc => NFKC.normalize(text),
    }
}

#[inline]
fn is_abjad_mark(c: char) -> bool {
    matches!(c,
        // Hebrew marks
        '\u{0591}'..='\u{05C7}'
        // Arabic marks
        | '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{06D6}'..='\u{06ED}'
        | ARABIC_TATWEEL
    )
}

/// Remove vowel points and other marks of Hebrew and Arabic, and tatweels.
pub fn remove_marks(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_abjad_mark) {
        Cow::Owned(text.chars().filter(|c| !is_abjad_mark(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Full Unicode case folding (`ß` → `ss`, `ς` → `σ`).
pub fn casefold(text: &str) -> String {
    String::from(CaseMapper::new().fold_string(text))
}

/// Case folding that keeps the dots of Turkish `i`s: `İ` → `i`, `I` → `ı`.
pub fn casefold_with_i_dots(text: &str) -> String {
    let text = NFC.normalize(text);
    let text = text.replace('İ', "i").replace('I', "ı");
    casefold(&text)
}

/// `ş` → `ș` and `ţ` → `ț`. Only lowercase letters are replaced.
pub fn cedillas_to_commas(text: &str) -> Cow<'_, str> {
    replace_chars(text, &[('ş', 'ș'), ('ţ', 'ț')])
}

/// `ș` → `ş` and `ț` → `ţ`. Only lowercase letters are replaced.
pub fn commas_to_cedillas(text: &str) -> Cow<'_, str> {
    replace_chars(text, &[('ș', 'ş'), ('ț', 'ţ')])
}

/// Straighten typographic single and double quotes.
pub fn uncurl_quotes(text: &str) -> Cow<'_, str> {
    let straighten = |c: char| match c {
        '\u{02BC}' | '\u{2018}'..='\u{201B}' => '\'',
        '\u{201C}'..='\u{201F}' => '"',
        c => c,
    };
    if text.chars().any(|c| straighten(c) != c) {
        Cow::Owned(text.chars().map(straighten).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn replace_chars<'a>(text: &'a str, pairs: &[(char, char)]) -> Cow<'a, str> {
    let replacement = |c: char| pairs.iter().find(|(from, _)| *from == c).map(|(_, to)| *to);
    if text.chars().any(|c| replacement(c).is_some()) {
        Cow::Owned(text.chars().map(|c| replacement(c).unwrap_or(c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casefolding() {
        assert_eq!(normalize("Word", "en"), "word");
        assert_eq!(normalize("groß", "de"), "gross");
        assert_eq!(normalize("λέξις", "el"), "λέξισ");
    }

    #[test]
    fn dotted_and_dotless_i() {
        assert_eq!(normalize("HAKKINDA İSTANBUL", "tr"), "hakkında istanbul");
        // decomposed dotted capital I
        assert_eq!(normalize("I\u{0307}zmir", "tr"), "izmir");
        assert_eq!(normalize("HAKKINDA", "en"), "hakkinda");
    }

    #[test]
    fn diacritics_under() {
        assert_eq!(normalize("kișinin", "tr"), "kişinin");
        assert_eq!(normalize("ACELAŞI", "ro"), "același");
        assert_eq!(normalize("ţară", "ro"), "țară");
        // other languages are left alone
        assert_eq!(normalize("ş ș", "en"), "ş ș");
    }

    #[test]
    fn unicode_normal_forms() {
        let word = normalize("natu\u{0308}rlich", "de");
        assert_eq!(word, "natürlich");
        assert!(word.contains('\u{00FC}'));

        assert_eq!(normalize("Ｕターン", "ja"), "uターン");

        let hangul = normalize("\u{1102}\u{1161}\u{11c0}\u{1106}\u{1161}\u{11af}", "ko");
        assert_eq!(hangul, "낱말");
        assert_eq!(hangul.chars().count(), 2);

        // NFC keeps compatibility characters in cased scripts
        assert_eq!(normalize("x²", "en"), "x²");
        assert_eq!(normalize("x²", "ja"), "x2");
    }

    #[test]
    fn abjad_marks() {
        assert_eq!(normalize("كَلِمَة", "ar"), "كلمة");
        assert_eq!(normalize("الحمــــــد", "ar"), "الحمد");
        assert_eq!(normalize("שָׁלוֹם", "he"), "שלום");
    }

    #[test]
    fn transliteration() {
        assert_eq!(normalize("схваташ", "sr"), "shvataš");
        assert_eq!(normalize("культуры", "sr"), "kul'tury");
        assert_eq!(normalize("бағырты", "az"), "bağırtı");
        assert_eq!(normalize("ЉУБЉАНА", "sr"), "ljubljana");
        // Cyrillic is kept for other languages
        assert_eq!(normalize("Культура", "ru"), "культура");
    }

    #[test]
    fn whitespace_and_quotes() {
        assert_eq!(normalize("\tdon’t\n", "en"), "don't");
        assert_eq!(normalize("“quoted”\tword", "en"), "\"quoted\" word");
        assert_eq!(normalize("   ", "en"), "");
        assert_eq!(normalize("", "xx"), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            ("Word", "en"),
            ("HAKKINDA İSTANBUL", "tr"),
            ("ACELAŞI", "ro"),
            ("kișinin", "tr"),
            ("ЉУБЉАНА культуры", "sr"),
            ("бағырты", "az"),
            ("Қазақ тілі", "kk"),
            ("كَلِمَة", "ar"),
            ("Ｕターン", "ja"),
            ("groß “Straße”", "de"),
        ];
        for (text, lang) in samples {
            let once = normalize(text, lang);
            assert_eq!(normalize(&once, lang), once, "{text:?} ({lang})");
        }
    }

    #[test]
    fn normalizer_caches_profiles() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("ACELAŞI", "ro"), "același");
        assert_eq!(normalizer.normalize("ŞI", "ro"), "și");
        assert_eq!(normalizer.profile("ro").diacritics_under, DiacriticsUnder::Commas);
    }

    #[test]
    fn normalize_token_generalizes_numbers() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize_token("V3.2", "en"), "NUM:v#.#");
        assert_eq!(normalizer.normalize_token("R2D2", "en"), "r2d2");
        assert_eq!(normalizer.normalize_token("１２３", "ja"), "NUM:###");
    }
}
