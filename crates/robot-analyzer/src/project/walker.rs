use std::path::PathBuf;

use tracing::debug;

use super::{
    definition::{KeywordDefinition, KeywordMatcher, KeywordOrigin, file_keywords},
    graph::{ImportGraph, Visit},
    libraries::library_keywords,
};
use crate::{syntax::ParseCache, vfs::FileId};

/// Enumerates keyword definitions visible from a file: its own keywords,
/// then those of everything it imports, in import-graph visitation order.
pub struct KeywordWalker<'a> {
    graph: ImportGraph<'a>,
}

impl<'a> KeywordWalker<'a> {
    pub fn new(
        cache: &'a ParseCache,
        search_roots: &'a [PathBuf],
    ) -> Self {
        Self {
            graph: ImportGraph::new(cache, search_roots),
        }
    }

    pub fn with_implicit_builtin(
        self,
        enabled: bool,
    ) -> Self {
        Self {
            graph: self.graph.with_implicit_builtin(enabled),
        }
    }

    /// Definitions accepted by `matcher`, produced lazily. Files are loaded
    /// only as the iterator reaches them. Duplicate names from different
    /// origins are all yielded.
    pub fn definitions(
        &self,
        start: FileId,
        matcher: &KeywordMatcher,
    ) -> impl Iterator<Item = KeywordDefinition> {
        self.graph
            .reachable(start)
            .flat_map(visit_definitions)
            .filter(move |definition| matcher.matches(&definition.name))
    }

    /// Callback form of [`Self::definitions`]. Returns how many definitions
    /// were reported.
    pub fn for_each_keyword_definition(
        &self,
        start: FileId,
        matcher: &KeywordMatcher,
        mut visitor: impl FnMut(KeywordDefinition),
    ) -> usize {
        let mut count = 0;
        for definition in self.definitions(start, matcher) {
            visitor(definition);
            count += 1;
        }
        count
    }
}

fn visit_definitions(visit: Visit) -> Vec<KeywordDefinition> {
    match visit {
        Visit::File {
            file,
            parsed,
        } => file_keywords(&file, &parsed),
        Visit::Library(name) => match library_keywords(&name) {
            Some(keywords) => keywords
                .iter()
                .map(|keyword| KeywordDefinition {
                    name: (*keyword).to_string(),
                    origin: KeywordOrigin::Library(name.clone()),
                    line: None,
                })
                .collect(),
            None => {
                debug!("[imports] no keyword list for library '{name}'");
                Vec::new()
            },
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src/project/walker_tests.rs"]
mod tests;
