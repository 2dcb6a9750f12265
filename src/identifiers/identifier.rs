/*! Identifier trait

All identifiers should implement [Identifier] to be usable when building corpora.
!*/
use unic_ucd::GeneralCategory;

use crate::{
    error::Error,
    lang::LanguageTag,
    normalization::{
        text::{casefold, unicode_normalize},
        NormalForm,
    },
};

/// Identified language and its confidence.
///
/// `prob` comes from a softmax and is usually overconfident: it is not a calibrated probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    label: LanguageTag,
    prob: f32,
}

impl Identification {
    pub fn new(label: LanguageTag, prob: f32) -> Self {
        Self { label, prob }
    }

    /// Get a reference to the identification's label.
    pub fn label(&self) -> &LanguageTag {
        &self.label
    }

    pub fn prob(&self) -> f32 {
        self.prob
    }
}

pub trait Identifier<T> {
    /// Identify the language of `text`, `Ok(None)` if there's no reliable identification.
    fn identify(&self, text: T) -> Result<Option<Identification>, Error>;
}

/// Keep only what helps identifying a language:
/// text is NFKC-normalized and casefolded, then everything but letters, marks and whitespace is removed.
/// Whitespace runs are collapsed into single spaces.
pub fn clean_text(text: &str) -> String {
    let text = casefold(&unicode_normalize(text, NormalForm::Nfkc));
    let kept: String = text
        .chars()
        .filter(|&c| {
            let category = GeneralCategory::of(c);
            category.is_letter()
                || category.is_mark()
                || category.is_separator()
                || c.is_whitespace()
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_keeps_letters_and_marks() {
        assert_eq!(clean_text("Hello, World! 123"), "hello world");
        assert_eq!(clean_text("  l'été\n\tdernier  "), "lété dernier");
        assert_eq!(clean_text("ｆｕｌｌｗｉｄｔｈ"), "fullwidth");
        assert_eq!(clean_text("नमस्ते"), "नमस्ते");
    }

    #[test]
    fn clean_can_be_empty() {
        assert_eq!(clean_text("1234 !!! ???"), "");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn identification_accessors() {
        let id = Identification::new(LanguageTag::parse("fr").unwrap(), 0.9);
        assert_eq!(id.label().as_str(), "fr");
        assert_eq!(id.prob(), 0.9);
    }
}
