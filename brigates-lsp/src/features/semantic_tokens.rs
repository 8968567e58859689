use brigates_scanner::legend::{TOKEN_MODIFIERS_LEGEND, TOKEN_TYPES_LEGEND};
use brigates_scanner::{encode_relative, scan_with_cancellation, Cancellation, SemanticSpan};
use tower_lsp::lsp_types::{
    SemanticToken, SemanticTokenModifier, SemanticTokenType, SemanticTokensLegend,
};

/// The legend advertised to clients. Index and bit order come straight from the scanner's
/// legend tables.
pub fn semantic_tokens_legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: TOKEN_TYPES_LEGEND
            .into_iter()
            .map(SemanticTokenType::new)
            .collect(),
        token_modifiers: TOKEN_MODIFIERS_LEGEND
            .into_iter()
            .map(SemanticTokenModifier::new)
            .collect(),
    }
}

pub fn collect_semantic_tokens(
    text: &str,
    cancellation: &dyn Cancellation,
) -> Vec<SemanticSpan> {
    scan_with_cancellation(text, cancellation)
}

/// Delta-encode spans into LSP tokens.
pub fn encode_semantic_tokens(spans: &[SemanticSpan]) -> Vec<SemanticToken> {
    encode_relative(spans)
        .into_iter()
        .map(|token| SemanticToken {
            delta_line: token.line,
            delta_start: token.start,
            length: token.length,
            token_type: token.token_type,
            token_modifiers_bitset: token.token_modifiers,
        })
        .collect()
}
