//! Dotted token labels
//!
//! A label names a token type followed by its modifiers, separated by dots:
//! `macro.declaration`, `operator.async`, `keyword`. Hosts that describe token
//! styles by name use this form, and the CLI prints it.

use crate::legend::{TokenModifier, TokenModifiers, TokenType};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("empty token label")]
    Empty,
    #[error("unknown token type '{0}'")]
    UnknownType(String),
    #[error("unknown token modifier '{0}'")]
    UnknownModifier(String),
}

/// Split a dotted label into its type name and modifier names without validating either.
pub fn parse_token_label(text: &str) -> (&str, Vec<&str>) {
    let mut parts = text.split('.');
    let token_type = parts.next().unwrap_or_default();
    (token_type, parts.collect())
}

/// A validated type plus modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemanticLabel {
    pub token_type: TokenType,
    pub token_modifiers: TokenModifiers,
}

impl SemanticLabel {
    pub fn new(token_type: TokenType, token_modifiers: TokenModifiers) -> Self {
        Self {
            token_type,
            token_modifiers,
        }
    }
}

impl fmt::Display for SemanticLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token_type)?;
        for modifier in self.token_modifiers.iter() {
            write!(f, ".{}", modifier)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (type_name, modifier_names) = parse_token_label(s.trim());
        if type_name.is_empty() {
            return Err(LabelError::Empty);
        }
        let token_type = TokenType::from_name(type_name)
            .ok_or_else(|| LabelError::UnknownType(type_name.to_string()))?;
        let token_modifiers = modifier_names
            .into_iter()
            .map(|name| {
                TokenModifier::from_name(name)
                    .ok_or_else(|| LabelError::UnknownModifier(name.to_string()))
            })
            .collect::<Result<TokenModifiers, _>>()?;
        Ok(SemanticLabel::new(token_type, token_modifiers))
    }
}
