use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_languages: Vec<String>) -> Self {
        TranslationRequest {
            text: text.into(),
            target_languages,
            source_language: None,
        }
    }
}

/// Outcome for one target language. Either `text` or `error` is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
}

/// Keyed by the target-language string exactly as it was sent
/// (e.g. "Spanish"). Iteration follows the order in the response body.
pub type Translations = IndexMap<String, TranslationResult>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translations: Translations,
}
