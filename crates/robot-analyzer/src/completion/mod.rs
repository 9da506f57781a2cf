//! Keyword-name completion: where the keyword column is, the staged search
//! over visible definitions, and the LSP adapter.

pub mod engine;
pub mod position;
pub mod proposal;
pub mod provider;

pub use engine::{CompletionEngine, CompletionError, CompletionOutcome, CompletionStage};
pub use position::{
    KeywordRegion, leftmost_keyword_position, replacement_start, resolve_keyword_region, rightmost_keyword_position,
};
pub use proposal::Proposal;
pub use provider::CompletionProvider;
