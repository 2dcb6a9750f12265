//! Cyrillic to Latin transliteration of multi-script languages.
//!
//! The Serbian table is the base: it also covers Cyrillic letters of other
//! languages (Russian, Ukrainian, Macedonian...), so that loanwords come out in
//! Latin letters instead of a mixed script.
//! Azerbaijani and Kazakh override the letters whose romanization differs.
//!
//! Replacements keep the case of the source letter and may be longer than one
//! character (`Љ` → `Lj`). Case folding happens later in the pipeline.
use std::{borrow::Cow, fmt, str::FromStr};

use phf::phf_map;

use crate::error::Error;

/// The three available transliteration tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transliteration {
    /// `sr-Latn`
    SerbianLatin,
    /// `az-Latn`
    AzerbaijaniLatin,
    /// `kk-Latn`
    KazakhLatin,
}

static SR_LATN: phf::Map<char, &'static str> = phf_map! {
    'А' => "A",   'а' => "a",
    'Б' => "B",   'б' => "b",
    'В' => "V",   'в' => "v",
    'Г' => "G",   'г' => "g",
    'Д' => "D",   'д' => "d",
    'Ђ' => "Đ",   'ђ' => "đ",
    'Е' => "E",   'е' => "e",
    'Ж' => "Ž",   'ж' => "ž",
    'З' => "Z",   'з' => "z",
    'И' => "I",   'и' => "i",
    'Ј' => "J",   'ј' => "j",
    'К' => "K",   'к' => "k",
    'Л' => "L",   'л' => "l",
    'Љ' => "Lj",  'љ' => "lj",
    'М' => "M",   'м' => "m",
    'Н' => "N",   'н' => "n",
    'Њ' => "Nj",  'њ' => "nj",
    'О' => "O",   'о' => "o",
    'П' => "P",   'п' => "p",
    'Р' => "R",   'р' => "r",
    'С' => "S",   'с' => "s",
    'Т' => "T",   'т' => "t",
    'Ћ' => "Ć",   'ћ' => "ć",
    'У' => "U",   'у' => "u",
    'Ф' => "F",   'ф' => "f",
    'Х' => "H",   'х' => "h",
    'Ц' => "C",   'ц' => "c",
    'Ч' => "Č",   'ч' => "č",
    'Џ' => "Dž",  'џ' => "dž",
    'Ш' => "Š",   'ш' => "š",

    // Russian, in Serbian style
    'Ё' => "Jo",  'ё' => "jo",
    'Й' => "J",   'й' => "j",
    'Щ' => "Šč",  'щ' => "šč",
    'Ъ' => "",    'ъ' => "",
    'Ы' => "Y",   'ы' => "y",
    'Ь' => "'",   'ь' => "'",
    'Э' => "E",   'э' => "e",
    'Ю' => "Ju",  'ю' => "ju",
    'Я' => "Ja",  'я' => "ja",

    // Belarusian
    'Ў' => "Ŭ",   'ў' => "ŭ",

    // Ukrainian
    'Є' => "Je",  'є' => "je",
    'І' => "I",   'і' => "i",
    'Ї' => "Ï",   'ї' => "ï",
    'Ґ' => "G",   'ґ' => "g",

    // Macedonian
    'Ѕ' => "Dz",  'ѕ' => "dz",
    'Ѓ' => "Ǵ",   'ѓ' => "ǵ",
    'Ќ' => "Ḱ",   'ќ' => "ḱ",

    // Tajik
    'Ҷ' => "Dž",  'ҷ' => "dž",

    // Azerbaijani
    'Ҹ' => "C",   'ҹ' => "c",
    'Ғ' => "Ğ",   'ғ' => "ğ",
    'Һ' => "H",   'һ' => "h",
    'Ө' => "Ö",   'ө' => "ö",
    'Ҝ' => "G",   'ҝ' => "g",
    'Ү' => "Ü",   'ү' => "ü",

    // Kazakh
    'Қ' => "Q",   'қ' => "q",
    'Ә' => "A'",  'ә' => "a'",
    'Ң' => "N'",  'ң' => "n'",
    'Ұ' => "U",   'ұ' => "u",

    // Obsolete letters, transcribed like Polish when possible
    'Ѣ' => "Ě",   'ѣ' => "ě",
    'Ѧ' => "Ę",   'ѧ' => "ę",
    'Ѩ' => "Ję",  'ѩ' => "ję",
    'Ѫ' => "Ą",   'ѫ' => "ą",
    'Ѭ' => "Ją",  'ѭ' => "ją",
    'Ѥ' => "Je",  'ѥ' => "je",
};

static AZ_LATN: phf::Map<char, &'static str> = phf_map! {
    'Ч' => "Ç",   'ч' => "ç",
    'Х' => "X",   'х' => "x",
    'Ы' => "I",   'ы' => "ı",
    'И' => "İ",   'и' => "i",
    'Ж' => "J",   'ж' => "j",
    'Ј' => "Y",   'ј' => "y",
    'Г' => "Q",   'г' => "q",
    'Ш' => "Ş",   'ш' => "ş",
    'Ә' => "Ə",   'ә' => "ə",
};

static KK_LATN: phf::Map<char, &'static str> = phf_map! {
    'Ғ' => "G'",  'ғ' => "g'",
    'И' => "I'",  'и' => "i'",
    'Й' => "I'",  'й' => "i'",
    'Ж' => "J",   'ж' => "j",
    'Ө' => "O'",  'ө' => "o'",
    'У' => "Y'",  'у' => "y'",
    'Ү' => "U'",  'ү' => "u'",
    'Һ' => "H",   'һ' => "h",
    'Ч' => "C'",  'ч' => "c'",
};

impl Transliteration {
    pub const ALL: [Transliteration; 3] = [
        Transliteration::SerbianLatin,
        Transliteration::AzerbaijaniLatin,
        Transliteration::KazakhLatin,
    ];

    /// Identifier of the table, in the form of a language tag.
    pub fn id(self) -> &'static str {
        match self {
            Transliteration::SerbianLatin => "sr-Latn",
            Transliteration::AzerbaijaniLatin => "az-Latn",
            Transliteration::KazakhLatin => "kk-Latn",
        }
    }

    fn overrides(self) -> Option<&'static phf::Map<char, &'static str>> {
        match self {
            Transliteration::SerbianLatin => None,
            Transliteration::AzerbaijaniLatin => Some(&AZ_LATN),
            Transliteration::KazakhLatin => Some(&KK_LATN),
        }
    }

    /// Replacement of `c`, or `None` if `c` is not covered by the table.
    #[inline]
    pub fn lookup(self, c: char) -> Option<&'static str> {
        self.overrides()
            .and_then(|table| table.get(&c))
            .or_else(|| SR_LATN.get(&c))
            .copied()
    }

    /// Transliterate `text`, borrowing it back when no character is covered.
    pub fn apply(self, text: &str) -> Cow<'_, str> {
        if !text.chars().any(|c| self.lookup(c).is_some()) {
            return Cow::Borrowed(text);
        }

        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match self.lookup(c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        Cow::Owned(out)
    }
}

impl fmt::Display for Transliteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Transliteration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transliteration::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| Error::UnknownTransliteration(s.to_string()))
    }
}

/// Transliterate `text` with the table identified by `table` (`sr-Latn`, `az-Latn` or `kk-Latn`).
///
/// # Errors
/// Returns [Error::UnknownTransliteration] for any other identifier.
pub fn transliterate(table: &str, text: &str) -> Result<String, Error> {
    let table: Transliteration = table.parse()?;
    Ok(table.apply(text).into_owned())
}
