pub mod semantic_tokens;
