//! Language Server Protocol (LSP) implementation for brigates highlighting
//!
//!     This crate serves the scanner's spans to any LSP-compatible editor as semantic tokens.
//!     It replaces a per-editor extension: the editor only needs to start `brigates-lsp` for
//!     Verilog buffers.
//!
//! Feature Set
//!
//!     Semantic Tokens (textDocument/semanticTokens/full):
//!         - `// brigates` marker comments
//!         - declaration keywords after the marker (reg, inst, wire, param, output, ...)
//!         - `python` and `protect` regions, with unmatched `end` markers flagged
//!
//!     Nothing else is advertised. There is no range request and no delta request: a scan is
//!     a cheap full pass over the document.
//!
//! Architecture
//!
//!     LSP Layer (tower-lsp):
//!         - JSON-RPC transport, capability negotiation, request routing
//!
//!     Server Layer (server.rs):
//!         - Implements LanguageServer
//!         - Stores the text of open documents whose language id is configured
//!         - Cancels an in-flight scan when its document changes or closes
//!
//!     Feature Layer (features/):
//!         - Legend registration and conversion of spans to the wire format
//!         - Stateless, all logic lives in brigates-scanner
//!
//! Usage
//!
//!         $ brigates-lsp
//!         Starts the language server on stdin/stdout. Logs go to stderr, filtered by
//!         BRIGATES_LOG or the configured `logging.level`.

pub mod features;
pub mod server;

pub use server::BrigatesLanguageServer;
