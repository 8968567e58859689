//! The scanner's output entity.

use crate::label::SemanticLabel;
use crate::legend::{TokenModifier, TokenModifiers, TokenType};
use serde::Serialize;

/// A classified `(line, column, length)` range.
///
/// Spans never cross a line boundary. Positions are UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SemanticSpan {
    pub line: u32,
    pub start_character: u32,
    pub length: u32,
    pub token_type: TokenType,
    pub token_modifiers: TokenModifiers,
}

impl SemanticSpan {
    pub fn new(
        line: u32,
        start_character: u32,
        length: u32,
        token_type: TokenType,
        token_modifiers: TokenModifiers,
    ) -> Self {
        Self {
            line,
            start_character,
            length,
            token_type,
            token_modifiers,
        }
    }

    /// Span with exactly one modifier, which is every span the scanner emits.
    pub(crate) fn with_modifier(
        line: u32,
        start_character: u32,
        length: u32,
        token_type: TokenType,
        modifier: TokenModifier,
    ) -> Self {
        Self::new(
            line,
            start_character,
            length,
            token_type,
            TokenModifiers::single(modifier),
        )
    }

    /// Column one past the last covered unit.
    pub fn end_character(&self) -> u32 {
        self.start_character + self.length
    }

    pub fn label(&self) -> SemanticLabel {
        SemanticLabel::new(self.token_type, self.token_modifiers)
    }

    pub fn has_modifier(&self, modifier: TokenModifier) -> bool {
        self.token_modifiers.contains(modifier)
    }
}
