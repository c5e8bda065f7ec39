//! Translation form controller.
//!
//! Owns the form state, validates input before anything is sent, drives a
//! [`TranslationBackend`] and folds the outcome back into renderable state.
//! At most one request is in flight per controller.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info, warn};

use crate::api::TranslationBackend;
use crate::error::{TranslationError, ValidationError};
use crate::models::{TranslationRequest, TranslationResponse, Translations};

pub const SUCCESS_MESSAGE: &str = "Translation completed successfully!";
pub const REQUIRED_FIELD_MESSAGE: &str = "This field is required";
pub const NOT_AVAILABLE_MESSAGE: &str = "Translation not available";

/// Notices hide themselves after this long.
pub const NOTICE_TTL_SECS: i64 = 6;

/// A dismissible error or success signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    fn new(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.raised_at >= Duration::seconds(NOTICE_TTL_SECS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub text: String,
    /// Never empty; a blank slot is still a slot.
    pub target_languages: Vec<String>,
    pub source_language: Option<String>,
    pub translations: Translations,
    pub loading: bool,
    pub error: Option<Notice>,
    pub success: Option<Notice>,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            text: String::new(),
            target_languages: vec![String::new()],
            source_language: None,
            translations: Translations::new(),
            loading: false,
            error: None,
            success: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    Text(String),
    Error(String),
    NotAvailable,
}

impl ResultBody {
    pub fn as_str(&self) -> &str {
        match self {
            ResultBody::Text(s) | ResultBody::Error(s) => s,
            ResultBody::NotAvailable => NOT_AVAILABLE_MESSAGE,
        }
    }
}

/// One rendered entry of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub language: String,
    pub heading: String,
    pub body: ResultBody,
}

#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error.as_ref().map(|n| n.message.as_str())
    }

    pub fn is_success(&self) -> bool {
        self.state.success.is_some()
    }

    // === Edits ===

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.state.text = value.into();
    }

    pub fn set_source_language(&mut self, value: Option<String>) {
        self.state.source_language = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
    }

    pub fn add_target_language_slot(&mut self) {
        self.state.target_languages.push(String::new());
    }

    /// Removing the last remaining slot blanks it instead.
    pub fn remove_target_language_slot(&mut self, index: usize) {
        let slots = &mut self.state.target_languages;
        if index >= slots.len() {
            warn!("[Form] No target language slot at index {}", index);
            return;
        }

        if slots.len() == 1 {
            slots[0].clear();
        } else {
            slots.remove(index);
        }
    }

    pub fn set_target_language_at(&mut self, index: usize, value: impl Into<String>) {
        match self.state.target_languages.get_mut(index) {
            Some(slot) => *slot = value.into(),
            None => warn!("[Form] No target language slot at index {}", index),
        }
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    pub fn dismiss_success(&mut self) {
        self.state.success = None;
    }

    /// Drop notices that have been showing for `NOTICE_TTL_SECS` or more.
    pub fn expire_notices(&mut self, now: DateTime<Utc>) {
        if self.state.error.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.state.error = None;
        }
        if self.state.success.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.state.success = None;
        }
    }

    // === Submission ===

    pub fn validate(&self) -> Result<TranslationRequest, ValidationError> {
        if self.state.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let languages: Vec<String> = self
            .state
            .target_languages
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect();

        if languages.is_empty() {
            return Err(ValidationError::NoTargetLanguage);
        }

        Ok(TranslationRequest {
            text: self.state.text.clone(),
            target_languages: languages,
            source_language: self.state.source_language.clone(),
        })
    }

    /// Validate and enter Loading. Returns the request to send, or `None`
    /// when input is invalid or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<TranslationRequest> {
        if self.state.loading {
            debug!("[Form] Submit ignored, a request is already in flight");
            return None;
        }

        match self.validate() {
            Err(e) => {
                warn!("[Form] Validation failed: {}", e);
                self.state.error = Some(Notice::new(e.to_string()));
                None
            }
            Ok(request) => {
                info!(
                    "[Form] Translating {} chars into {:?}",
                    request.text.chars().count(),
                    request.target_languages
                );
                self.state.loading = true;
                self.state.error = None;
                self.state.success = None;
                self.state.translations.clear();
                Some(request)
            }
        }
    }

    /// Apply the outcome of the request started by `begin_submit`.
    pub fn complete(&mut self, outcome: Result<TranslationResponse, TranslationError>) {
        if !self.state.loading {
            warn!("[Form] Completion arrived with no request in flight");
        }
        self.state.loading = false;

        match outcome {
            Ok(response) => {
                info!("[Form] Received {} translation(s)", response.translations.len());
                self.state.translations = response.translations;
                self.state.success = Some(Notice::new(SUCCESS_MESSAGE));
            }
            Err(e) => {
                error!("[Form] Translation failed: {}", e);
                self.state.translations.clear();
                self.state.error = Some(Notice::new(e.to_string()));
            }
        }
    }

    /// Returns whether a request was sent.
    pub async fn submit<B>(&mut self, backend: &B) -> bool
    where
        B: TranslationBackend + ?Sized,
    {
        let Some(request) = self.begin_submit() else {
            return false;
        };

        let outcome = backend.send(&request).await;
        self.complete(outcome);
        true
    }

    // === Presentation helpers ===

    pub fn can_submit(&self) -> bool {
        !self.state.loading && !self.state.text.trim().is_empty()
    }

    pub fn can_remove_slot(&self) -> bool {
        self.state.target_languages.len() > 1
    }

    pub fn slot_label(index: usize) -> String {
        format!("Target Language {}", index + 1)
    }

    pub fn text_field_error(&self) -> Option<&'static str> {
        if self.state.text.trim().is_empty() && self.state.error.is_some() {
            Some(REQUIRED_FIELD_MESSAGE)
        } else {
            None
        }
    }

    pub fn results(&self) -> Vec<ResultView> {
        self.state
            .translations
            .iter()
            .map(|(language, result)| {
                let mut heading = format!("Translation to {}", language);
                if let Some(source) = non_empty(&result.source_language) {
                    heading.push_str(&format!(" (from {})", source));
                }

                let body = if let Some(text) = non_empty(&result.text) {
                    ResultBody::Text(text.to_string())
                } else if let Some(err) = non_empty(&result.error) {
                    ResultBody::Error(err.to_string())
                } else {
                    ResultBody::NotAvailable
                };

                ResultView {
                    language: language.clone(),
                    heading,
                    body,
                }
            })
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
