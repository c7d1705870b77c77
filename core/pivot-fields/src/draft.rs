//! FILENAME: core/pivot-fields/src/draft.rs
//! New derived fields: the draft a user fills in before a field is added,
//! its form rules, and the expression text being authored.
//!
//! The expression is opaque here. It is stored with the field but never
//! parsed or evaluated.

use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// Minimum length of a new field's name, in characters.
pub const MIN_FIELD_NAME_LEN: usize = 2;
/// Maximum length of a new field's name, in characters.
pub const MAX_FIELD_NAME_LEN: usize = 50;
/// Minimum length of a new field's expression, in characters.
pub const MIN_EXPRESSION_LEN: usize = 2;

/// A proposed derived field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldDraft {
    pub id: String,
    pub expression: String,
}

impl FieldDraft {
    pub fn new(id: impl Into<String>, expression: impl Into<String>) -> Self {
        FieldDraft {
            id: id.into(),
            expression: expression.into(),
        }
    }
}

/// Checks a draft against the form rules. All failures are returned.
pub fn validate_draft<S: AsRef<str>>(draft: &FieldDraft, existing: &[S]) -> Result<(), Vec<DraftError>> {
    let mut errors = Vec::new();

    let name_len = draft.id.chars().count();
    if name_len < MIN_FIELD_NAME_LEN {
        errors.push(DraftError::NameTooShort { min: MIN_FIELD_NAME_LEN });
    }
    if name_len > MAX_FIELD_NAME_LEN {
        errors.push(DraftError::NameTooLong { max: MAX_FIELD_NAME_LEN });
    }
    if existing.iter().any(|name| name.as_ref() == draft.id) {
        errors.push(DraftError::NameExists);
    }
    if draft.expression.chars().count() < MIN_EXPRESSION_LEN {
        errors.push(DraftError::ExpressionTooShort { min: MIN_EXPRESSION_LEN });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Proposes "New Field N" with the smallest unused N >= 1.
pub fn next_draft_name<S: AsRef<str>>(existing: &[S]) -> String {
    (1..)
        .map(|n| format!("New Field {}", n))
        .find(|candidate| !existing.iter().any(|name| name.as_ref() == candidate))
        .unwrap_or_default()
}

// ============================================================================
// EXPRESSION AUTHORING
// ============================================================================

/// Expression text with a cursor, measured in characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpressionDraft {
    text: String,
    cursor: usize,
}

impl ExpressionDraft {
    /// Cursor starts at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        ExpressionDraft { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamped to the text length.
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.text.chars().count());
    }

    /// Inserts `token` at the cursor and moves the cursor past it.
    pub fn insert_token(&mut self, token: &str) {
        let byte_index = self
            .text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        self.text.insert_str(byte_index, token);
        self.cursor += token.chars().count();
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
