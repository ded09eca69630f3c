use std::collections::HashMap;
use std::time::Duration;

use lazy_static::lazy_static;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

const TRANSLATE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";
const REQUEST_TIMEOUT_SECS: u64 = 30;

lazy_static! {
    // Lexical corrections applied to the service response before lowercasing.
    static ref LABEL_FIXUPS: HashMap<&'static str, &'static str> =
        HashMap::from([("Novella", "Novela")]);
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Translation service returned status {0}")]
    Status(StatusCode),
    #[error("Unexpected translation response for '{text}'")]
    UnexpectedResponse { text: String },
    #[error("Empty translation for '{text}'")]
    Empty { text: String },
}

/// A string-to-string translation capability.
///
/// Injectable so tests can substitute a deterministic stub for the live
/// service.
pub trait Translator {
    fn translate(&self, text: &str) -> Result<String, TranslateError>;
}

/// Client for the public Google translate endpoint. Source language is
/// auto-detected; failures propagate to the caller, there is no retry.
pub struct GoogleTranslator {
    client: reqwest::blocking::Client,
    target_lang: String,
}

impl GoogleTranslator {
    pub fn new(target_lang: &str) -> Result<Self, TranslateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(GoogleTranslator {
            client,
            target_lang: target_lang.to_string(),
        })
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(TRANSLATE_API_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target_lang.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(TranslateError::Status(response.status()));
        }

        // The endpoint answers [[["<translated>", "<source>", ...], ...], ...]
        let body: Value = response.json()?;
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| TranslateError::UnexpectedResponse {
                text: text.to_string(),
            })?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(Value::as_str) {
                translated.push_str(part);
            }
        }

        if translated.is_empty() {
            return Err(TranslateError::Empty {
                text: text.to_string(),
            });
        }

        Ok(translated)
    }
}

/// Translate one genre label: service call, lexical fixup, lowercase.
pub fn translate_genre_label(
    label: &str,
    translator: &dyn Translator,
) -> Result<String, TranslateError> {
    let translated = translator.translate(label)?;
    let fixed = LABEL_FIXUPS
        .get(translated.as_str())
        .map(|s| s.to_string())
        .unwrap_or(translated);
    Ok(fixed.to_lowercase())
}

/// One service call per distinct label, never per book row.
pub fn translate_genre_labels(
    labels: &[String],
    translator: &dyn Translator,
) -> Result<Vec<String>, TranslateError> {
    labels
        .iter()
        .map(|label| translate_genre_label(label, translator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubTranslator {
        by_source: HashMap<&'static str, &'static str>,
    }

    impl StubTranslator {
        fn new() -> Self {
            StubTranslator {
                by_source: HashMap::from([
                    ("Fantasy", "Fantasia"),
                    ("Crime novel", "Romance policial"),
                    // The service leaves this one untranslated.
                    ("Novella", "Novella"),
                    ("Unknown", "Desconhecido"),
                ]),
            }
        }
    }

    impl Translator for StubTranslator {
        fn translate(&self, text: &str) -> Result<String, TranslateError> {
            self.by_source
                .get(text)
                .map(|s| s.to_string())
                .ok_or_else(|| TranslateError::Empty {
                    text: text.to_string(),
                })
        }
    }

    struct FailingTranslator;

    impl Translator for FailingTranslator {
        fn translate(&self, text: &str) -> Result<String, TranslateError> {
            Err(TranslateError::UnexpectedResponse {
                text: text.to_string(),
            })
        }
    }

    #[test]
    fn test_labels_are_lowercased() {
        let stub = StubTranslator::new();
        assert_eq!(
            translate_genre_label("Fantasy", &stub).unwrap(),
            "fantasia"
        );
        assert_eq!(
            translate_genre_label("Crime novel", &stub).unwrap(),
            "romance policial"
        );
    }

    #[test]
    fn test_novella_fixup() {
        let stub = StubTranslator::new();
        assert_eq!(translate_genre_label("Novella", &stub).unwrap(), "novela");
    }

    #[test]
    fn test_batch_translation_is_nonempty_lowercase() {
        let stub = StubTranslator::new();
        let labels = vec!["Fantasy".to_string(), "Unknown".to_string()];

        let translated = translate_genre_labels(&labels, &stub).unwrap();

        assert_eq!(translated.len(), labels.len());
        for label in &translated {
            assert!(!label.is_empty());
            assert_eq!(*label, label.to_lowercase());
        }
    }

    #[test]
    fn test_service_failure_propagates() {
        let result = translate_genre_labels(&["Fantasy".to_string()], &FailingTranslator);
        assert!(result.is_err());
    }
}
