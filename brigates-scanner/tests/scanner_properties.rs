//! Property-based tests for the line scanner
//!
//! Documents are generated from a mix of marker lines, module headers, region markers and
//! arbitrary text so that every phase of the scanner gets exercised. Whatever the input,
//! the scanner must produce in-bounds, ordered spans and must do so deterministically.

use brigates_scanner::{scan, TokenModifier, TokenType};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use regex::Regex;

/// Lines that hit the interesting branches, plus arbitrary noise.
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Marker followed by a known keyword
        (
            "[ \t]{0,3}",
            prop::sample::select(vec![
                "dff", "reg", "inst", "conn", "wire", "comb", "param", "direc", "input",
                "dffnn", "dffpn", "dffpp", "dffnp", "output", "assign",
            ]),
            "[a-z_0-9 ]{0,12}",
        )
            .prop_map(|(indent, keyword, rest)| format!("{indent}// brigates {keyword} {rest}")),
        // Region markers
        prop::sample::select(vec![
            "// brigates python start",
            "// brigates python end",
            "// brigates protect start",
            "// brigates protect end",
            "  //  brigates   python   end  ",
        ])
        .prop_map(str::to_string),
        // Module headers
        "[ ]{0,2}module [a-z_]{1,8}( \\(clk\\);)?",
        // Marker with arbitrary statement
        "// brigates [ -~]{0,16}",
        // Plain text, including non-ASCII
        "[ -~]{0,24}",
        "\\PC{0,12}",
    ]
}

fn terminator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["\n", "\r\n", "\r"])
}

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Physical lines of `text`, split the way the scanner splits them.
fn physical_lines(text: &str) -> Vec<String> {
    LINE_BREAK.split(text).map(str::to_string).collect()
}

/// A document as its physical lines plus the joined text.
///
/// A `\r` terminator followed by an empty line ending in `\n` reads as a single `\r\n`, so
/// the lines are taken from the joined text rather than from the generated parts.
fn document_strategy() -> impl Strategy<Value = (Vec<String>, String)> {
    prop::collection::vec((line_strategy(), terminator_strategy()), 0..24).prop_map(|parts| {
        let text = parts
            .iter()
            .map(|(line, terminator)| format!("{line}{terminator}"))
            .collect::<String>();
        (physical_lines(&text), text)
    })
}

fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}

/// Filler that contains no region marker and no module header.
fn filler_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Leading punctuation keeps this from ever reading as a module header
        "[;=][a-z;= ]{0,19}",
        "// brigates (reg|wire|inst) [a-z]{1,6}",
        "// brigates [a-z]{1,8}",
    ]
}

#[test]
fn carriage_return_before_empty_line_is_one_break() {
    let text = "// brigates dff \r\n// brigates dff \n";
    let lines = physical_lines(text);
    assert_eq!(lines, vec!["// brigates dff ", "// brigates dff ", ""]);

    let spans = scan(text);
    let rows: Vec<u32> = spans.iter().map(|span| span.line).collect();
    assert_eq!(rows, vec![0, 0, 0, 1, 1, 1]);
    for span in &spans {
        assert!(span.end_character() <= utf16_len(&lines[span.line as usize]));
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn spans_stay_inside_their_line((lines, text) in document_strategy()) {
            for span in scan(&text) {
                let line = lines.get(span.line as usize).map(String::as_str).unwrap_or("");
                prop_assert!(
                    span.end_character() <= utf16_len(line),
                    "span {:?} overruns line {:?}",
                    span,
                    line
                );
            }
        }

        #[test]
        fn spans_are_ordered((_lines, text) in document_strategy()) {
            let spans = scan(&text);
            for pair in spans.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(
                    (a.line, a.start_character) <= (b.line, b.start_character),
                    "{:?} emitted before {:?}",
                    a,
                    b
                );
            }
        }

        #[test]
        fn scanning_is_deterministic((_lines, text) in document_strategy()) {
            prop_assert_eq!(scan(&text), scan(&text));
        }

        #[test]
        fn every_span_carries_one_modifier((_lines, text) in document_strategy()) {
            for span in scan(&text) {
                prop_assert_eq!(span.token_modifiers.iter().count(), 1);
            }
        }

        #[test]
        fn python_region_round_trip(
            before in prop::collection::vec(filler_strategy(), 0..4),
            between in prop::collection::vec(filler_strategy(), 0..6),
        ) {
            let mut lines = before.clone();
            let start_line = lines.len() as u32;
            lines.push("// brigates python start".to_string());
            lines.extend(between.iter().cloned());
            let end_line = lines.len() as u32;
            lines.push("// brigates python end".to_string());

            let spans = scan(&lines.join("\n"));
            let start = spans
                .iter()
                .find(|span| span.line == start_line && span.has_modifier(TokenModifier::Async))
                .expect("start span");
            prop_assert_eq!(start.token_type, TokenType::Macro);

            let end = spans
                .iter()
                .find(|span| span.line == end_line && span.token_type != TokenType::Keyword)
                .expect("end span");
            prop_assert_eq!(end.token_type, TokenType::Macro);
            prop_assert!(end.has_modifier(TokenModifier::Modification));
        }
    }
}
