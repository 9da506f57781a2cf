use std::{
    collections::HashSet,
    path::PathBuf,
    sync::Arc,
};

use tracing::{debug, warn};

use super::{
    imports::{Import, collect_imports, resource_candidates},
    libraries::BUILTIN_LIBRARY,
};
use crate::{
    syntax::{LoadError, ParseCache, ParsedFile},
    vfs::FileId,
};

/// One node reached while walking the imports of a file.
#[derive(Debug, Clone)]
pub enum Visit {
    File {
        file: FileId,
        parsed: Arc<ParsedFile>,
    },
    Library(String),
}

/// Resource and library imports reachable from a file.
///
/// Files are loaded through the parse cache, so open editor buffers shadow
/// their on-disk content.
pub struct ImportGraph<'a> {
    cache: &'a ParseCache,
    search_roots: &'a [PathBuf],
    implicit_builtin: bool,
}

impl<'a> ImportGraph<'a> {
    pub fn new(
        cache: &'a ParseCache,
        search_roots: &'a [PathBuf],
    ) -> Self {
        Self {
            cache,
            search_roots,
            implicit_builtin: true,
        }
    }

    pub fn with_implicit_builtin(
        mut self,
        enabled: bool,
    ) -> Self {
        self.implicit_builtin = enabled;
        self
    }

    /// Depth-first pre-order walk starting at `start`. Imports are followed in
    /// declaration order and every file or library is reached at most once,
    /// so cycles terminate. `BuiltIn` comes last unless it was imported
    /// explicitly or is disabled.
    pub fn reachable(
        &self,
        start: FileId,
    ) -> Traversal<'_> {
        Traversal {
            graph: self,
            stack: vec![Pending::File(start)],
            visited_files: HashSet::new(),
            visited_libraries: HashSet::new(),
            builtin_done: !self.implicit_builtin,
        }
    }

    fn resolve_resource(
        &self,
        owner: &FileId,
        raw: &str,
    ) -> Option<FileId> {
        let owner_path = owner.to_path().unwrap_or_default();
        resource_candidates(&owner_path, raw, self.search_roots)
            .iter()
            .map(|candidate| (candidate, FileId::from_path(candidate)))
            .find(|(candidate, id)| self.cache.contains(id) || candidate.is_file())
            .map(|(_, id)| id)
    }
}

enum Pending {
    File(FileId),
    Library(String),
}

/// Iterator state of [`ImportGraph::reachable`].
pub struct Traversal<'g> {
    graph: &'g ImportGraph<'g>,
    stack: Vec<Pending>,
    visited_files: HashSet<FileId>,
    visited_libraries: HashSet<String>,
    builtin_done: bool,
}

impl Traversal<'_> {
    fn expand(
        &mut self,
        file: &FileId,
        parsed: &ParsedFile,
    ) {
        let imports = collect_imports(parsed);
        // Reversed so the first import is popped first.
        for import in imports.into_iter().rev() {
            match import {
                Import::Library(name) => self.stack.push(Pending::Library(name)),
                Import::Resource(raw) => match self.graph.resolve_resource(file, &raw) {
                    Some(resource) => self.stack.push(Pending::File(resource)),
                    None => debug!("[imports] unresolved resource '{raw}' in {}", file.short_name()),
                },
            }
        }
    }
}

impl Iterator for Traversal<'_> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        while let Some(pending) = self.stack.pop() {
            match pending {
                Pending::File(file) => {
                    if !self.visited_files.insert(file.clone()) {
                        continue;
                    }
                    let parsed = match self.graph.cache.get_or_load(&file) {
                        Ok(parsed) => parsed,
                        Err(error @ LoadError::NotOnDisk(_)) => {
                            debug!("[imports] skipping: {error}");
                            continue;
                        },
                        Err(error) => {
                            warn!("[imports] {error}");
                            continue;
                        },
                    };
                    self.expand(&file, &parsed);
                    return Some(Visit::File {
                        file,
                        parsed,
                    });
                },
                Pending::Library(name) => {
                    if self.visited_libraries.insert(name.to_lowercase()) {
                        return Some(Visit::Library(name));
                    }
                },
            }
        }

        if !self.builtin_done {
            self.builtin_done = true;
            if self.visited_libraries.insert(BUILTIN_LIBRARY.to_lowercase()) {
                return Some(Visit::Library(BUILTIN_LIBRARY.to_string()));
            }
        }
        None
    }
}
