//! Integer encoding of spans
//!
//! Hosts receive five integers per span: line, start, length, type index and modifier
//! bitmask. The relative form follows the Language Server Protocol convention, where line
//! and start are deltas from the previous token; the absolute form keeps raw positions.

use crate::legend::{
    TokenModifier, TokenType, NOT_IN_LEGEND, TOKEN_MODIFIERS_LEGEND, TOKEN_TYPES_LEGEND,
};
use crate::span::SemanticSpan;
use serde::Serialize;

/// Type index reserved for the `notInLegend` sentinel.
pub const NOT_IN_LEGEND_TYPE_INDEX: u32 = TOKEN_TYPES_LEGEND.len() as u32 + 2;

/// Bit set for any modifier name outside the legend.
pub const MODIFIER_OVERFLOW_BIT: u32 = 1 << (TOKEN_MODIFIERS_LEGEND.len() as u32 + 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodedToken {
    pub line: u32,
    pub start: u32,
    pub length: u32,
    pub token_type: u32,
    pub token_modifiers: u32,
}

impl EncodedToken {
    pub fn to_array(self) -> [u32; 5] {
        [
            self.line,
            self.start,
            self.length,
            self.token_type,
            self.token_modifiers,
        ]
    }
}

/// Legend index of a type name.
///
/// `notInLegend` maps to [`NOT_IN_LEGEND_TYPE_INDEX`]; any other unknown name maps to 0.
pub fn encode_token_type(name: &str) -> u32 {
    match TokenType::from_name(name) {
        Some(kind) => kind.index(),
        None if name == NOT_IN_LEGEND => NOT_IN_LEGEND_TYPE_INDEX,
        None => 0,
    }
}

/// Bitmask of modifier names. Unknown names set [`MODIFIER_OVERFLOW_BIT`].
pub fn encode_token_modifiers<S: AsRef<str>>(names: &[S]) -> u32 {
    names
        .iter()
        .map(|name| match TokenModifier::from_name(name.as_ref()) {
            Some(modifier) => modifier.bit(),
            None => MODIFIER_OVERFLOW_BIT,
        })
        .fold(0, |bits, bit| bits | bit)
}

/// Absolute positions. Zero-length spans are dropped.
pub fn encode_absolute(spans: &[SemanticSpan]) -> Vec<EncodedToken> {
    spans
        .iter()
        .filter(|span| span.length > 0)
        .map(|span| EncodedToken {
            line: span.line,
            start: span.start_character,
            length: span.length,
            token_type: span.token_type.index(),
            token_modifiers: span.token_modifiers.bits(),
        })
        .collect()
}

/// Delta-encoded positions. Zero-length spans are dropped before deltas are taken.
pub fn encode_relative(spans: &[SemanticSpan]) -> Vec<EncodedToken> {
    let mut data = Vec::with_capacity(spans.len());
    let mut prev_line = 0u32;
    let mut prev_start = 0u32;

    for token in encode_absolute(spans) {
        let delta_line = token.line.saturating_sub(prev_line);
        let delta_start = if delta_line == 0 {
            token.start.saturating_sub(prev_start)
        } else {
            token.start
        };
        data.push(EncodedToken {
            line: delta_line,
            start: delta_start,
            ..token
        });
        prev_line = token.line;
        prev_start = token.start;
    }

    data
}
