//! Token legend
//!
//! The legend is the contract between the scanner and whatever renders its output: a token
//! type is transmitted as its index in [`TOKEN_TYPES_LEGEND`], a modifier as bit `index` of a
//! bitmask over [`TOKEN_MODIFIERS_LEGEND`]. Both tables are fixed; consumers registered with
//! this legend depend on the exact order.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Token type names, index 0..=20.
pub const TOKEN_TYPES_LEGEND: [&str; 21] = [
    "comment",
    "string",
    "keyword",
    "number",
    "regexp",
    "operator",
    "namespace",
    "type",
    "struct",
    "class",
    "interface",
    "enum",
    "typeParameter",
    "function",
    "method",
    "decorator",
    "macro",
    "variable",
    "parameter",
    "property",
    "label",
];

/// Token modifier names, bit 0..=7.
pub const TOKEN_MODIFIERS_LEGEND: [&str; 8] = [
    "declaration",
    "documentation",
    "readonly",
    "static",
    "abstract",
    "deprecated",
    "modification",
    "async",
];

/// Reserved name that encodes to the out-of-legend sentinel.
pub const NOT_IN_LEGEND: &str = "notInLegend";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Comment,
    String,
    Keyword,
    Number,
    Regexp,
    Operator,
    Namespace,
    Type,
    Struct,
    Class,
    Interface,
    Enum,
    TypeParameter,
    Function,
    Method,
    Decorator,
    Macro,
    Variable,
    Parameter,
    Property,
    Label,
}

impl TokenType {
    /// All token types in legend order.
    pub const ALL: [TokenType; 21] = [
        TokenType::Comment,
        TokenType::String,
        TokenType::Keyword,
        TokenType::Number,
        TokenType::Regexp,
        TokenType::Operator,
        TokenType::Namespace,
        TokenType::Type,
        TokenType::Struct,
        TokenType::Class,
        TokenType::Interface,
        TokenType::Enum,
        TokenType::TypeParameter,
        TokenType::Function,
        TokenType::Method,
        TokenType::Decorator,
        TokenType::Macro,
        TokenType::Variable,
        TokenType::Parameter,
        TokenType::Property,
        TokenType::Label,
    ];

    /// Position in [`TOKEN_TYPES_LEGEND`].
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        TOKEN_TYPES_LEGEND[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenModifier {
    Declaration,
    Documentation,
    Readonly,
    Static,
    Abstract,
    Deprecated,
    Modification,
    Async,
}

impl TokenModifier {
    /// All modifiers in legend order.
    pub const ALL: [TokenModifier; 8] = [
        TokenModifier::Declaration,
        TokenModifier::Documentation,
        TokenModifier::Readonly,
        TokenModifier::Static,
        TokenModifier::Abstract,
        TokenModifier::Deprecated,
        TokenModifier::Modification,
        TokenModifier::Async,
    ];

    /// Position in [`TOKEN_MODIFIERS_LEGEND`], which is also the bit this modifier sets.
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    pub fn as_str(self) -> &'static str {
        TOKEN_MODIFIERS_LEGEND[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|modifier| modifier.as_str() == name)
    }
}

impl fmt::Display for TokenModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order-insensitive set of modifiers, stored as the legend bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenModifiers(u32);

impl TokenModifiers {
    pub const fn empty() -> Self {
        TokenModifiers(0)
    }

    pub fn single(modifier: TokenModifier) -> Self {
        TokenModifiers(modifier.bit())
    }

    pub fn with(mut self, modifier: TokenModifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn insert(&mut self, modifier: TokenModifier) {
        self.0 |= modifier.bit();
    }

    pub fn contains(self, modifier: TokenModifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The wire bitmask.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Members in legend order.
    pub fn iter(self) -> impl Iterator<Item = TokenModifier> {
        TokenModifier::ALL
            .into_iter()
            .filter(move |modifier| self.contains(*modifier))
    }
}

impl FromIterator<TokenModifier> for TokenModifiers {
    fn from_iter<I: IntoIterator<Item = TokenModifier>>(iter: I) -> Self {
        iter.into_iter()
            .fold(TokenModifiers::empty(), TokenModifiers::with)
    }
}

impl Serialize for TokenModifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for modifier in self.iter() {
            seq.serialize_element(modifier.as_str())?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_order_matches_legend() {
        for (index, kind) in TokenType::ALL.iter().enumerate() {
            assert_eq!(kind.index() as usize, index);
            assert_eq!(kind.as_str(), TOKEN_TYPES_LEGEND[index]);
        }
        for (index, modifier) in TokenModifier::ALL.iter().enumerate() {
            assert_eq!(modifier.index() as usize, index);
            assert_eq!(modifier.as_str(), TOKEN_MODIFIERS_LEGEND[index]);
        }
    }

    #[test]
    fn well_known_indices() {
        assert_eq!(TokenType::Keyword.index(), 2);
        assert_eq!(TokenType::Operator.index(), 5);
        assert_eq!(TokenType::Class.index(), 9);
        assert_eq!(TokenType::Function.index(), 13);
        assert_eq!(TokenType::Macro.index(), 16);
        assert_eq!(TokenModifier::Declaration.bit(), 1);
        assert_eq!(TokenModifier::Deprecated.bit(), 1 << 5);
        assert_eq!(TokenModifier::Async.bit(), 1 << 7);
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(
            TokenType::from_name("typeParameter"),
            Some(TokenType::TypeParameter)
        );
        assert_eq!(TokenType::from_name("TypeParameter"), None);
        assert_eq!(
            TokenModifier::from_name("modification"),
            Some(TokenModifier::Modification)
        );
        assert_eq!(TokenModifier::from_name(NOT_IN_LEGEND), None);
    }

    #[test]
    fn modifier_set_ignores_order_and_duplicates() {
        let a: TokenModifiers = [TokenModifier::Async, TokenModifier::Declaration]
            .into_iter()
            .collect();
        let b: TokenModifiers = [
            TokenModifier::Declaration,
            TokenModifier::Async,
            TokenModifier::Declaration,
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
        assert_eq!(a.bits(), 0b1000_0001);
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![TokenModifier::Declaration, TokenModifier::Async]
        );
    }

    #[test]
    fn modifiers_serialize_as_names() {
        let modifiers = TokenModifiers::single(TokenModifier::Deprecated);
        let json = serde_json::to_string(&modifiers).unwrap();
        assert_eq!(json, r#"["deprecated"]"#);
        let json = serde_json::to_string(&TokenType::TypeParameter).unwrap();
        assert_eq!(json, r#""typeParameter""#);
    }
}
