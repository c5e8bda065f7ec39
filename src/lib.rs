//! Client for the TranslatorAI translation service: one HTTP call wrapper
//! plus the form controller that validates input and holds results.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod models;

pub use api::{TranslationBackend, TranslationClient};
pub use config::Config;
pub use error::{TranslationError, ValidationError};
pub use form::{FormController, FormState, ResultBody, ResultView};
pub use models::{TranslationRequest, TranslationResponse, TranslationResult, Translations};
