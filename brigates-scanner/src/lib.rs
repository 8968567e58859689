//! Semantic highlighting scanner for brigates-annotated Verilog
//!
//!     The scanner walks a document line by line and classifies the parts of each line that
//!     carry meaning for the brigates tooling: the `// brigates` marker comment, the
//!     declaration keyword that follows it, and the `python` / `protect` region markers.
//!     It is not a parser. Nothing is validated, nothing fails: text that matches no pattern
//!     simply produces no span.
//!
//! Architecture
//!
//!     legend:     The fixed, ordered token type and modifier legends. Order defines the
//!                 integer encoding, so it must never change.
//!     span:       `SemanticSpan`, the single output entity (line, column, length, label).
//!     scanner:    The per-line state machine. Cross-line memory is the module regime and a
//!                 single-slot pairing marker.
//!     encoding:   Turns spans (or raw type/modifier names) into the integers a host expects.
//!     label:      Dotted `type.modifier` labels, used for display and for parsing names.
//!     cancel:     Cooperative cancellation checked once per line.
//!     loader:     Reads documents from disk or memory and scans them.
//!
//! Usage
//!
//!         use brigates_scanner::scan;
//!
//!         let spans = scan("// brigates reg counter\n");
//!         assert_eq!(spans.len(), 3);
//!
//! Positions
//!
//!     Columns and lengths are UTF-16 code units, the default encoding of the Language Server
//!     Protocol. For ASCII sources this is the plain character count.

pub mod cancel;
pub mod encoding;
pub mod label;
pub mod legend;
pub mod loader;
pub mod scanner;
pub mod span;

pub use cancel::{Cancellation, NeverCancelled};
pub use encoding::{
    encode_absolute, encode_relative, encode_token_modifiers, encode_token_type, EncodedToken,
};
pub use label::{parse_token_label, LabelError, SemanticLabel};
pub use legend::{TokenModifier, TokenModifiers, TokenType};
pub use loader::{DocumentLoader, LoaderError};
pub use scanner::{scan, scan_with_cancellation, LineScanner};
pub use span::SemanticSpan;
