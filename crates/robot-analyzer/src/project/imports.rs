use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::{Captures, Regex};

use crate::{
    syntax::{ArgumentCell, LineKind, ParsedFile},
    vfs::normalized_path,
};

/// An import declared in a Settings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    Resource(String),
    Library(String),
}

/// Imports of a file in declaration order.
///
/// Only `Resource` and `Library` settings contribute keywords. Setting
/// names are case-insensitive and may carry a trailing colon, as older test
/// data does.
pub fn collect_imports(parsed: &ParsedFile) -> Vec<Import> {
    let mut imports = Vec::new();
    for line in parsed.lines() {
        if line.kind() != LineKind::Setting {
            continue;
        }
        let (Some(setting), Some(target)) = (line.cell(0), line.cell(1).map(ArgumentCell::value)) else {
            continue;
        };
        if target.is_empty() {
            continue;
        }
        let setting = setting.value().trim_end_matches(':').trim().to_lowercase();
        match setting.as_str() {
            "resource" => imports.push(Import::Resource(target.to_string())),
            "library" => imports.push(Import::Library(target.to_string())),
            _ => {},
        }
    }
    imports
}

static PATH_VARIABLE: OnceLock<Regex> = OnceLock::new();

fn path_variable() -> &'static Regex {
    PATH_VARIABLE.get_or_init(|| {
        Regex::new(r"\$\{(?P<builtin>[^}]*)\}|%\{(?P<env>[A-Za-z_][A-Za-z0-9_]*)\}").expect("path variable pattern")
    })
}

/// Expand the variables Robot Framework allows in import paths:
/// `${CURDIR}` (directory of the importing file), `${EXECDIR}` (taken as the
/// first search root), `${/}`, `${TEMPDIR}` and `%{ENV_VAR}`. Built-in names
/// ignore case, spaces and underscores. Anything unknown is left as written.
pub(crate) fn expand_path_variables(
    raw: &str,
    owner_dir: Option<&Path>,
    exec_dir: Option<&Path>,
) -> String {
    path_variable()
        .replace_all(raw, |captures: &Captures<'_>| {
            let whole = captures[0].to_string();
            if let Some(name) = captures.name("env") {
                return std::env::var(name.as_str()).unwrap_or(whole);
            }
            let name = captures.name("builtin").map_or("", |m| m.as_str());
            if name == "/" {
                return std::path::MAIN_SEPARATOR.to_string();
            }
            let dir = match normalized_variable_name(name).as_str() {
                "curdir" => owner_dir.map(Path::to_path_buf),
                "execdir" => exec_dir.map(Path::to_path_buf),
                "tempdir" => Some(std::env::temp_dir()),
                _ => None,
            };
            dir.map_or(whole, |dir| dir.display().to_string())
        })
        .into_owned()
}

fn normalized_variable_name(name: &str) -> String {
    name.chars().filter(|c| *c != ' ' && *c != '_').flat_map(char::to_lowercase).collect()
}

/// Candidate locations for a resource import, most specific first: relative
/// to the importing file, then relative to each search root.
pub(crate) fn resource_candidates(
    owner: &Path,
    raw: &str,
    search_roots: &[PathBuf],
) -> Vec<PathBuf> {
    let owner_dir = owner.parent();
    let expanded = expand_path_variables(raw, owner_dir, search_roots.first().map(PathBuf::as_path));
    let target = Path::new(&expanded);

    if target.is_absolute() {
        return vec![normalized_path(target)];
    }

    let mut candidates = Vec::with_capacity(search_roots.len() + 1);
    if let Some(dir) = owner_dir {
        candidates.push(normalized_path(&dir.join(target)));
    }
    for root in search_roots {
        let candidate = normalized_path(&root.join(target));
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

#[cfg(test)]
#[path = "../../tests/src/project/imports_tests.rs"]
mod tests;
