//! Fasttext identifier
use std::path::Path;

use fasttext::{FastText as FastTextLib, Prediction};
use log::debug;

use crate::{
    error::Error,
    lang::{closest_match, LanguageTag, LOOSE_MATCH_DISTANCE},
};

use super::identifier::{clean_text, Identification, Identifier};

const LABEL_PREFIX: &str = "__label__";

/// Languages identified labels are aligned to by default.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "am", "ar", "az", "bg", "bn", "ca", "cs", "da", "de", "el", "en", "es", "et", "eu", "fa",
    "fi", "fr", "ga", "grc", "gu", "he", "hi", "hr", "hu", "hy", "id", "is", "it", "ja", "kn", "ko",
    "ky", "lb", "lij", "lt", "lv", "mk", "ml", "mr", "nb", "ne", "nl", "pl", "pt", "ro", "ru", "sa",
    "si", "sk", "sl", "sq", "sr", "sv", "ta", "te", "th", "ti", "tl", "tn", "tt", "uk", "ur", "vi",
    "yo", "zh",
];

/// Clean the prediction label field from `__label__xx` into `xx`.
///
/// # Errors
/// Returns an error if the label does not start with `__label__`.
fn clean_prediction(prediction: &Prediction) -> Result<Prediction, String> {
    match prediction.label.strip_prefix(LABEL_PREFIX) {
        Some(label) => Ok(Prediction {
            prob: prediction.prob,
            label: label.to_string(),
        }),
        None => Err(format!(
            "Label has no {LABEL_PREFIX} prefix: {}",
            prediction.label
        )),
    }
}

/// Closest of `supported` to `label`, or `und` if none is close enough.
pub fn align_language(label: &str, supported: &[&str]) -> LanguageTag {
    closest_match(label, supported, LOOSE_MATCH_DISTANCE)
        .and_then(|(matched, _)| LanguageTag::parse(matched).ok())
        .unwrap_or_else(LanguageTag::undetermined)
}

/// Holds a [fasttext::FastText] instance and its parameters:
/// - [FastText::threshold], prediction threshold
/// - [FastText::supported], languages labels are aligned to
pub struct FastText {
    predictor: FastTextLib,
    pub threshold: f32,
    pub supported: &'static [&'static str],
}

impl FastText {
    /// Default location of the model.
    pub const DEFAULT_MODEL: &'static str = "lid.176.ftz";

    /// Create a new fasttext classifier.
    ///
    /// `filename` has to be a path to a `bin` or `ftz` model file.
    ///
    /// # Errors
    /// Propagates [fasttext::FastText] errors.
    pub fn new(filename: &Path, threshold: f32) -> Result<Self, Error> {
        let filename = filename
            .to_str()
            .ok_or_else(|| Error::Custom(format!("invalid filepath for lid: {:?}", filename)))?;

        let mut predictor = FastTextLib::new();
        predictor.load_model(filename)?;
        Ok(Self {
            predictor,
            threshold,
            supported: SUPPORTED_LANGUAGES,
        })
    }

    /// Align labels to `supported` instead of [SUPPORTED_LANGUAGES].
    pub fn with_supported(mut self, supported: &'static [&'static str]) -> Self {
        self.supported = supported;
        self
    }

    /// Raw predictions for `text`, with cleaned labels.
    pub fn predict(&self, text: &str, k: i32) -> Result<Vec<Prediction>, Error> {
        let predictions = self.predictor.predict(text, k, self.threshold)?;
        Ok(predictions
            .into_iter()
            .map(|p| clean_prediction(&p).unwrap_or(p))
            .collect())
    }
}

impl Identifier<&str> for FastText {
    fn identify(&self, text: &str) -> Result<Option<Identification>, Error> {
        // null chars make fasttext choke
        let cleaned = clean_text(&text.replace(char::from(0), ""));
        if cleaned.is_empty() {
            return Ok(None);
        }

        let prediction = match self.predict(&cleaned, 1)?.into_iter().next() {
            Some(prediction) => prediction,
            None => return Ok(None),
        };

        let label = align_language(&prediction.label, self.supported);
        debug!("{} ({}) → {label}", prediction.label, prediction.prob);
        Ok(Some(Identification::new(label, prediction.prob)))
    }
}
