//! Line patterns
//!
//! Every pattern is tried against either a whole line (headers) or the remainder of a line
//! after the `brigates` marker word. Keyword families are tried in declaration order and
//! the first match wins, so `dff` must stay ahead of the five-letter `dff??` variants: the
//! trailing `\s+` keeps `dffnn` from matching the `dff` family.

use crate::legend::TokenType;
use once_cell::sync::Lazy;
use regex::Regex;

/// The marker word, as it appears in `// brigates ...`.
pub(crate) const MARKER_WORD: &str = "brigates";

/// `module` followed by whitespace at the start of a line.
pub(crate) static MODULE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*module\s+").expect("module header pattern"));

/// A line comment whose first word is the marker.
pub(crate) static MARKER_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*//\s+brigates\s+").expect("marker comment pattern"));

/// `python start` / `python end` filling the rest of the line.
pub(crate) static PYTHON_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*python\s+(?P<edge>start|end)\s*$").expect("python pairing pattern")
});

/// `protect start` / `protect end` filling the rest of the line.
pub(crate) static PROTECT_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*protect\s+(?P<edge>start|end)\s*$").expect("protect pairing pattern")
});

/// Keyword table: members, highlighted length, type.
///
/// The length is fixed per family and counts the trailing separator for the three-letter
/// keywords.
const KEYWORD_TABLE: &[(&[&str], u32, TokenType)] = &[
    (&["dff", "reg"], 4, TokenType::Macro),
    (&["inst"], 4, TokenType::Class),
    (&["conn", "wire", "comb"], 4, TokenType::Macro),
    (
        &["param", "direc", "input", "dffnn", "dffpn", "dffpp", "dffnp"],
        5,
        TokenType::Macro,
    ),
    (&["output", "assign"], 6, TokenType::Macro),
];

/// One row of the keyword table with its compiled patterns.
pub(crate) struct KeywordFamily {
    /// Whole-family test, anchored at the start of the remainder.
    pub(crate) family: Regex,
    /// Unanchored search used to find where the keyword sits.
    pub(crate) locate: Regex,
    pub(crate) length: u32,
    pub(crate) token_type: TokenType,
}

impl KeywordFamily {
    fn compile(members: &[&str], length: u32, token_type: TokenType) -> Self {
        let alternatives = members.join("|");
        KeywordFamily {
            family: Regex::new(&format!(r"^\s*({})\s+", alternatives))
                .expect("keyword family pattern"),
            locate: Regex::new(&format!("({})", alternatives)).expect("keyword locate pattern"),
            length,
            token_type,
        }
    }
}

pub(crate) static KEYWORD_FAMILIES: Lazy<Vec<KeywordFamily>> = Lazy::new(|| {
    KEYWORD_TABLE
        .iter()
        .map(|(members, length, token_type)| KeywordFamily::compile(members, *length, *token_type))
        .collect()
});

/// Which edge of a paired region a line marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairEdge {
    Start,
    End,
}

/// Match a pairing pattern against the remainder of a line.
pub(crate) fn pair_edge(pattern: &Regex, remainder: &str) -> Option<PairEdge> {
    let captures = pattern.captures(remainder)?;
    match captures.name("edge")?.as_str() {
        "start" => Some(PairEdge::Start),
        _ => Some(PairEdge::End),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_compile_in_table_order() {
        assert_eq!(KEYWORD_FAMILIES.len(), KEYWORD_TABLE.len());
        assert_eq!(KEYWORD_FAMILIES[1].token_type, TokenType::Class);
        assert_eq!(KEYWORD_FAMILIES[4].length, 6);
    }

    #[test]
    fn dff_family_needs_trailing_whitespace() {
        assert!(KEYWORD_FAMILIES[0].family.is_match(" dff q"));
        assert!(!KEYWORD_FAMILIES[0].family.is_match(" dffnn q"));
        assert!(KEYWORD_FAMILIES[3].family.is_match(" dffnn q"));
        assert!(!KEYWORD_FAMILIES[0].family.is_match(" reg"));
    }

    #[test]
    fn headers_are_anchored() {
        assert!(MODULE_HEADER.is_match("  module top(clk);"));
        assert!(!MODULE_HEADER.is_match("endmodule "));
        assert!(!MODULE_HEADER.is_match("module"));
        assert!(MARKER_COMMENT.is_match("// brigates reg q"));
        assert!(MARKER_COMMENT.is_match("\t//\tbrigates x"));
        assert!(!MARKER_COMMENT.is_match("//brigates reg q"));
        assert!(!MARKER_COMMENT.is_match("// brigatesreg q"));
        assert!(!MARKER_COMMENT.is_match("x // brigates reg q"));
    }

    #[test]
    fn pair_edges() {
        assert_eq!(pair_edge(&PYTHON_PAIR, " python start"), Some(PairEdge::Start));
        assert_eq!(pair_edge(&PYTHON_PAIR, " python   end  "), Some(PairEdge::End));
        assert_eq!(pair_edge(&PYTHON_PAIR, " python end now"), None);
        assert_eq!(pair_edge(&PYTHON_PAIR, " python"), None);
        assert_eq!(pair_edge(&PROTECT_PAIR, " protect start"), Some(PairEdge::Start));
        assert_eq!(pair_edge(&PROTECT_PAIR, " python start"), None);
    }
}
