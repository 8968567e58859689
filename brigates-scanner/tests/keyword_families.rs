//! Table-driven checks of the keyword families recognized after a `// brigates` marker.

use brigates_scanner::{scan, SemanticLabel, TokenType};
use rstest::rstest;

/// Scan a single marker line and return the keyword span's (start, length, label) plus the
/// label of the span closing the line.
fn classify(statement: &str) -> (u32, u32, String, Option<String>) {
    let spans = scan(&format!("// brigates {statement}"));
    assert_eq!(spans[0].token_type, TokenType::Keyword);
    let keyword = &spans[1];
    (
        keyword.start_character,
        keyword.length,
        keyword.label().to_string(),
        spans.get(2).map(|span| span.label().to_string()),
    )
}

#[rstest]
#[case("dff q_reg", 4, "macro.declaration")]
#[case("reg count", 4, "macro.declaration")]
#[case("inst u_alu", 4, "class.declaration")]
#[case("conn a b", 4, "macro.declaration")]
#[case("wire w0", 4, "macro.declaration")]
#[case("comb f", 4, "macro.declaration")]
#[case("param WIDTH 8", 5, "macro.declaration")]
#[case("direc in", 5, "macro.declaration")]
#[case("input clk", 5, "macro.declaration")]
#[case("dffnn q", 5, "macro.declaration")]
#[case("dffpn q", 5, "macro.declaration")]
#[case("dffpp q", 5, "macro.declaration")]
#[case("dffnp q", 5, "macro.declaration")]
#[case("output y", 6, "macro.declaration")]
#[case("assign y a", 6, "macro.declaration")]
fn keyword_family(#[case] statement: &str, #[case] length: u32, #[case] label: &str) {
    let (start, actual_length, actual_label, closing) = classify(statement);
    assert_eq!(start, 12);
    assert_eq!(actual_length, length);
    assert_eq!(actual_label, label);
    assert_eq!(closing.as_deref(), Some("operator.declaration"));
}

#[rstest]
#[case("register r")]
#[case("dffx q")]
#[case("instance u")]
#[case("Reg q")]
#[case("python begin")]
#[case("python start now")]
fn near_misses_are_functions(#[case] statement: &str) {
    let spans = scan(&format!("// brigates {statement}"));
    assert_eq!(spans.len(), 2);
    let expected: SemanticLabel = "function.declaration".parse().unwrap();
    assert_eq!(spans[1].label(), expected);
    assert_eq!(spans[1].start_character, 12);
    assert_eq!(spans[1].length as usize, statement.len());
}

#[rstest]
#[case("python start", "operator.async")]
#[case("python end", "operator.deprecated")]
#[case("python   start   ", "operator.async")]
fn region_markers_cover_the_statement(#[case] statement: &str, #[case] label: &str) {
    let spans = scan(&format!("// brigates {statement}"));
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[1].label().to_string(), label);
    assert_eq!(spans[1].start_character, 12);
    assert_eq!(spans[1].length as usize, statement.len());
}
