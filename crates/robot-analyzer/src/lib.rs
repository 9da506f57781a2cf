pub mod completion;
pub mod config;
pub mod document;
pub mod progress;
pub mod project;
pub mod server;
pub mod syntax;
pub mod text_pos;
pub mod vfs;

pub use completion::{CompletionEngine, CompletionOutcome, CompletionProvider, CompletionStage, Proposal};
pub use config::{CompletionSettings, MatchMode, ServerSettings};
pub use document::{Document, DocumentView};
pub use project::{KeywordDefinition, KeywordMatcher, KeywordOrigin, KeywordWalker};
pub use server::RobotLanguageServer;
pub use syntax::{LoadError, ParseCache, ParsedFile};
pub use vfs::FileId;
