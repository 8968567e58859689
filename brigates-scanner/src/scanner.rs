//! Line scanner
//!
//! The scanner processes a document one physical line at a time. Each line starts in
//! [`LinePhase::SeekingHeader`] and steps through the phase machine until it reaches
//! [`LinePhase::Ended`]; no phase revisits an earlier one, so every line terminates.
//!
//! Two pieces of state survive from one line to the next:
//!
//! - the [`Regime`]: before the first `module` header, a `// brigates` marker opts the line
//!   into keyword classification. After it, the marker only recognizes `protect` regions.
//!   The regime never goes back.
//! - the pairing slot: the [`OpenMarker`] handle of the last `start` marker that has not
//!   been closed yet. There is one slot. A second `start` replaces the first, and the first
//!   then never gets retyped.
//!
//! When an `end` marker finds an open slot, the span emitted for the matching `start` is
//! retyped to `macro` in place. That is the only change ever made to an emitted span.

mod patterns;

use self::patterns::{
    pair_edge, PairEdge, KEYWORD_FAMILIES, MARKER_COMMENT, MARKER_WORD, MODULE_HEADER,
    PROTECT_PAIR, PYTHON_PAIR,
};
use crate::cancel::{Cancellation, NeverCancelled};
use crate::legend::{TokenModifier, TokenType};
use crate::span::SemanticSpan;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("line break"));

/// Scan a whole document.
pub fn scan(text: &str) -> Vec<SemanticSpan> {
    scan_with_cancellation(text, &NeverCancelled)
}

/// Scan a whole document, checking `cancellation` before every line.
///
/// A cancelled scan returns the spans of the lines completed before cancellation.
pub fn scan_with_cancellation<C>(text: &str, cancellation: &C) -> Vec<SemanticSpan>
where
    C: Cancellation + ?Sized,
{
    let mut scanner = LineScanner::new();
    for line in LINE_BREAK.split(text) {
        if cancellation.is_cancelled() {
            debug!(
                line = scanner.lines_scanned(),
                spans = scanner.spans().len(),
                "scan cancelled"
            );
            break;
        }
        scanner.scan_line(line);
    }
    let spans = scanner.finish();
    debug!(spans = spans.len(), "scan finished");
    spans
}

/// Cross-line scanning mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Regime {
    /// No `module` header seen yet.
    #[default]
    PreModule,
    /// A `module` header was seen on an earlier line.
    InModule,
}

/// Handle to an emitted `start` span that is waiting for its `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMarker(usize);

impl OpenMarker {
    /// Index of the span in the scanner output.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-line phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePhase {
    SeekingHeader,
    /// The marker was found; `cursor` is the byte offset just past the marker word.
    MatchingKeyword { cursor: usize },
    /// One operator span from `column` to the end of the line remains.
    ClosingSpan { column: u32 },
    Ended,
}

struct LineText<'a> {
    index: u32,
    text: &'a str,
}

impl LineText<'_> {
    fn column(&self, byte: usize) -> u32 {
        utf16_len(&self.text[..byte])
    }

    fn width(&self) -> u32 {
        utf16_len(self.text)
    }

    /// Column where the statement after the marker begins. The marker word is always
    /// followed by one whitespace character, which is a single UTF-16 unit.
    fn body_column(&self, cursor: usize) -> u32 {
        self.column(cursor) + 1
    }
}

fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}

/// Incremental scanner state. Feed lines in document order with [`LineScanner::scan_line`].
#[derive(Debug, Default)]
pub struct LineScanner {
    regime: Regime,
    open_marker: Option<OpenMarker>,
    spans: Vec<SemanticSpan>,
    lines: u32,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn open_marker(&self) -> Option<OpenMarker> {
        self.open_marker
    }

    pub fn spans(&self) -> &[SemanticSpan] {
        &self.spans
    }

    pub fn lines_scanned(&self) -> u32 {
        self.lines
    }

    pub fn finish(self) -> Vec<SemanticSpan> {
        self.spans
    }

    /// Scan the next line. `text` must not contain line terminators.
    pub fn scan_line(&mut self, text: &str) {
        let line = LineText {
            index: self.lines,
            text,
        };
        self.lines += 1;

        let before = self.spans.len();
        let mut phase = LinePhase::SeekingHeader;
        while phase != LinePhase::Ended {
            phase = self.step(&line, phase);
        }
        trace!(
            line = line.index,
            spans = self.spans.len() - before,
            "line scanned"
        );
    }

    fn step(&mut self, line: &LineText<'_>, phase: LinePhase) -> LinePhase {
        match phase {
            LinePhase::SeekingHeader => self.seek_header(line),
            LinePhase::MatchingKeyword { cursor } => match self.regime {
                Regime::PreModule => self.match_keyword(line, cursor),
                Regime::InModule => self.match_protect(line, cursor),
            },
            LinePhase::ClosingSpan { column } => {
                self.emit(
                    line.index,
                    column,
                    line.width().saturating_sub(column),
                    TokenType::Operator,
                    TokenModifier::Declaration,
                );
                LinePhase::Ended
            }
            LinePhase::Ended => LinePhase::Ended,
        }
    }

    fn seek_header(&mut self, line: &LineText<'_>) -> LinePhase {
        if self.regime == Regime::PreModule && MODULE_HEADER.is_match(line.text) {
            debug!(line = line.index, "module header found");
            self.regime = Regime::InModule;
            return LinePhase::Ended;
        }
        if !MARKER_COMMENT.is_match(line.text) {
            return LinePhase::Ended;
        }
        let Some(marker) = line.text.find(MARKER_WORD) else {
            return LinePhase::Ended;
        };
        self.emit(
            line.index,
            line.column(marker),
            MARKER_WORD.len() as u32,
            TokenType::Keyword,
            TokenModifier::Declaration,
        );
        LinePhase::MatchingKeyword {
            cursor: marker + MARKER_WORD.len(),
        }
    }

    fn match_keyword(&mut self, line: &LineText<'_>, cursor: usize) -> LinePhase {
        let remainder = &line.text[cursor..];

        if let Some(family) = KEYWORD_FAMILIES
            .iter()
            .find(|family| family.family.is_match(remainder))
        {
            let Some(keyword) = family.locate.find(remainder) else {
                debug!(line = line.index, "keyword family matched without a keyword");
                return LinePhase::ClosingSpan {
                    column: line.body_column(cursor),
                };
            };
            let column = line.column(cursor + keyword.start());
            self.emit(
                line.index,
                column,
                family.length,
                family.token_type,
                TokenModifier::Declaration,
            );
            return LinePhase::ClosingSpan {
                column: column + family.length,
            };
        }

        match pair_edge(&PYTHON_PAIR, remainder) {
            Some(edge) => self.pair(line, cursor, edge),
            None => {
                self.emit_body(line, cursor, TokenType::Function, TokenModifier::Declaration);
            }
        }
        LinePhase::Ended
    }

    fn match_protect(&mut self, line: &LineText<'_>, cursor: usize) -> LinePhase {
        match pair_edge(&PROTECT_PAIR, &line.text[cursor..]) {
            Some(edge) => self.pair(line, cursor, edge),
            None => {
                self.emit_body(line, cursor, TokenType::Function, TokenModifier::Declaration);
            }
        }
        LinePhase::Ended
    }

    fn pair(&mut self, line: &LineText<'_>, cursor: usize, edge: PairEdge) {
        match edge {
            PairEdge::Start => {
                if let Some(previous) = self.open_marker {
                    debug!(
                        line = line.index,
                        replaced = previous.index(),
                        "start marker while another region is open"
                    );
                }
                let marker =
                    self.emit_body(line, cursor, TokenType::Operator, TokenModifier::Async);
                self.open_marker = Some(marker);
            }
            PairEdge::End => match self.open_marker.take() {
                Some(open) => {
                    self.emit_body(line, cursor, TokenType::Macro, TokenModifier::Modification);
                    self.retype(open, TokenType::Macro);
                    debug!(line = line.index, start = open.index(), "region closed");
                }
                None => {
                    debug!(line = line.index, "end marker without an open region");
                    self.emit_body(line, cursor, TokenType::Operator, TokenModifier::Deprecated);
                }
            },
        }
    }

    fn retype(&mut self, marker: OpenMarker, token_type: TokenType) {
        if let Some(span) = self.spans.get_mut(marker.index()) {
            span.token_type = token_type;
        }
    }

    /// Emit a span covering the statement after the marker.
    fn emit_body(
        &mut self,
        line: &LineText<'_>,
        cursor: usize,
        token_type: TokenType,
        modifier: TokenModifier,
    ) -> OpenMarker {
        let column = line.body_column(cursor);
        self.emit(
            line.index,
            column,
            line.width().saturating_sub(column),
            token_type,
            modifier,
        )
    }

    fn emit(
        &mut self,
        line: u32,
        start_character: u32,
        length: u32,
        token_type: TokenType,
        modifier: TokenModifier,
    ) -> OpenMarker {
        self.spans.push(SemanticSpan::with_modifier(
            line,
            start_character,
            length,
            token_type,
            modifier,
        ));
        OpenMarker(self.spans.len() - 1)
    }
}
