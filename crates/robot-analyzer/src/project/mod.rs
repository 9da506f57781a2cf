//! Keyword definitions and the import graph that makes them visible.

pub mod definition;
pub mod graph;
pub mod imports;
pub mod libraries;
pub mod walker;

pub use definition::{KeywordDefinition, KeywordMatcher, KeywordOrigin, file_keywords};
pub use graph::{ImportGraph, Visit};
pub use imports::{Import, collect_imports};
pub use libraries::{BUILTIN_LIBRARY, library_keywords};
pub use walker::KeywordWalker;
