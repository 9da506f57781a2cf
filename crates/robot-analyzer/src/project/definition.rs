use std::fmt;

use crate::{
    config::MatchMode,
    syntax::{ArgumentCell, ParsedFile},
    vfs::FileId,
};

/// Where a keyword is defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeywordOrigin {
    /// A user keyword in a suite or resource file.
    File(FileId),
    /// A keyword provided by a test library.
    Library(String),
}

impl fmt::Display for KeywordOrigin {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::File(file) => f.write_str(file.short_name()),
            Self::Library(name) => f.write_str(name),
        }
    }
}

/// A named keyword. Identity is `(name, origin)`: equal names from
/// different origins are different definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeywordDefinition {
    pub name: String,
    pub origin: KeywordOrigin,
    /// 0-based defining line, `None` for library keywords.
    pub line: Option<usize>,
}

/// User keywords defined in a parsed file, in source order.
pub fn file_keywords(
    file: &FileId,
    parsed: &ParsedFile,
) -> Vec<KeywordDefinition> {
    parsed
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| line.kind().is_keyword_definition())
        .filter_map(|(index, line)| {
            let name = line.cell(0).map(ArgumentCell::value).filter(|name| !name.is_empty())?;
            Some(KeywordDefinition {
                name: name.to_string(),
                origin: KeywordOrigin::File(file.clone()),
                line: Some(index),
            })
        })
        .collect()
}

/// Keyword name filter. Matching ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordMatcher {
    All,
    Prefix(String),
    Substring(String),
}

impl KeywordMatcher {
    pub fn new(
        mode: MatchMode,
        input: &str,
    ) -> Self {
        let needle = input.to_lowercase();
        match mode {
            MatchMode::Prefix => Self::Prefix(needle),
            MatchMode::Substring => Self::Substring(needle),
        }
    }

    pub fn matches(
        &self,
        name: &str,
    ) -> bool {
        match self {
            Self::All => true,
            Self::Prefix(needle) => name.to_lowercase().starts_with(needle.as_str()),
            Self::Substring(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/project/definition_tests.rs"]
mod tests;
