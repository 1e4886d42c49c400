//! Which text gets translated, and the seam to whatever does the translating.
mod fields;
mod locale;
pub mod tokens;

pub use fields::{FieldTranslator, IDENTIFIER_KEYS, TRANSLATABLE_KEYS, TranslatedField};
pub use locale::resolve_locale;

use crate::error::TransformError;

/// Defines the contract for a text translation backend.
///
/// Implementations receive text whose placeholders are already protected and
/// may fail per call; a failure only keeps that one field unchanged.
pub trait TextTransform: Send + Sync {
    fn name(&self) -> &str;

    fn transform(&self, text: &str, locale: &str) -> Result<String, TransformError>;

    /// Whether a leading mock prefix for the target locale is removed before the call.
    fn strips_mock_prefix(&self) -> bool {
        true
    }
}

/// Deterministic stand-in that tags text with the locale, e.g. `[es] Welcome`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTranslator;

impl TextTransform for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    fn transform(&self, text: &str, locale: &str) -> Result<String, TransformError> {
        if text.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("[{}] {}", locale, text))
    }

    fn strips_mock_prefix(&self) -> bool {
        false
    }
}

/// Leaves text as it is; mirrors structure without touching wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl TextTransform for IdentityTransform {
    fn name(&self) -> &str {
        "identity"
    }

    fn transform(&self, text: &str, _locale: &str) -> Result<String, TransformError> {
        Ok(text.to_string())
    }
}

/// Creates one of the built-in transforms by name.
pub fn transform_by_name(name: &str) -> Option<Box<dyn TextTransform>> {
    match name.to_lowercase().as_str() {
        "mock" => Some(Box::new(MockTranslator)),
        "identity" | "none" => Some(Box::new(IdentityTransform)),
        _ => None,
    }
}
