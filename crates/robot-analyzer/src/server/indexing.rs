use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::state::RobotLanguageServer;
use crate::{
    config::IndexingSettings,
    progress::ProgressToken,
    syntax::ParseCache,
    vfs::{FileId, normalized_path},
};

impl RobotLanguageServer {
    /// Create a lightweight handle suitable for passing into `tokio::spawn`.
    pub(crate) async fn clone_for_background(&self) -> BackgroundHandle {
        BackgroundHandle {
            client: self.client.clone(),
            parse_cache: Arc::clone(&self.parse_cache),
            workspace_roots: self.search_roots().await,
            settings: self.settings_snapshot().await.indexing,
        }
    }
}

/// State a background workspace scan needs, detached from the server.
pub(crate) struct BackgroundHandle {
    client: tower_lsp::Client,
    parse_cache: Arc<ParseCache>,
    workspace_roots: Vec<PathBuf>,
    settings: IndexingSettings,
}

impl BackgroundHandle {
    /// Parse every Robot Framework file in the workspace into the cache.
    ///
    /// Files already cached (open in the editor) are left alone.
    pub async fn index_workspace(&self) {
        if !self.settings.enable {
            info!("Skipping workspace indexing because robot-analyzer.indexing.enable=false");
            return;
        }

        let excluded_prefixes = build_exclude_prefixes(&self.workspace_roots, &self.settings.exclude_paths);
        let files = discover_robot_files(&self.workspace_roots, &self.settings, &excluded_prefixes);
        let total = files.len();
        if total == 0 {
            info!("No Robot Framework files found in workspace");
            return;
        }

        info!("Indexing {total} Robot Framework file(s) in workspace…");
        let progress = ProgressToken::begin(&self.client, "Indexing", total).await;

        let mut inserted = 0usize;
        for (index, path) in files.iter().enumerate() {
            match tokio::fs::read_to_string(path).await {
                Ok(source) => {
                    if self.parse_cache.insert_if_absent(FileId::from_path(path), &source) {
                        inserted += 1;
                    }
                },
                Err(error) => warn!("Failed to read {}: {error}", path.display()),
            }
            progress.advance(index + 1).await;
        }

        info!("Workspace index complete: {inserted} new file(s), {} cached", self.parse_cache.file_count());
        progress.end(Some(format!("{total} file(s) indexed"))).await;
    }
}

/// Robot Framework files under `roots`, normalized and deduplicated, in walk
/// order.
pub(crate) fn discover_robot_files(
    roots: &[PathBuf],
    settings: &IndexingSettings,
    excluded_prefixes: &[PathBuf],
) -> Vec<PathBuf> {
    let max_file_size_bytes = settings.max_file_size_bytes();
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for root in roots {
        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| should_descend_into_workspace_entry(entry, excluded_prefixes))
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| settings.is_indexed_extension(ext)) {
                continue;
            }

            if let Ok(metadata) = entry.metadata()
                && metadata.len() > max_file_size_bytes
            {
                debug!("Skipping large workspace file ({} bytes): {}", metadata.len(), path.display());
                continue;
            }

            let normalized = normalized_path(path);
            if seen.insert(normalized.clone()) {
                files.push(normalized);
            }
        }
    }

    files
}

fn should_descend_into_workspace_entry(
    entry: &DirEntry,
    excluded_prefixes: &[PathBuf],
) -> bool {
    let normalized = normalized_path(entry.path());
    if is_path_excluded(&normalized, excluded_prefixes) {
        return false;
    }

    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return true;
    }

    let Some(name) = entry.file_name().to_str() else {
        return false;
    };

    if name.starts_with('.') {
        return false;
    }

    !matches!(name, "target" | "node_modules" | "__pycache__" | "venv" | "results" | "output")
}

pub(crate) fn build_exclude_prefixes(
    workspace_roots: &[PathBuf],
    exclude_paths: &[String],
) -> Vec<PathBuf> {
    let mut excluded_prefixes = Vec::new();
    let mut seen = HashSet::new();

    for raw_path in exclude_paths {
        let exclude_path = PathBuf::from(raw_path);
        if exclude_path.is_absolute() {
            let normalized = normalized_path(&exclude_path);
            if seen.insert(normalized.clone()) {
                excluded_prefixes.push(normalized);
            }
            continue;
        }

        for workspace_root in workspace_roots {
            let normalized = normalized_path(&workspace_root.join(&exclude_path));
            if seen.insert(normalized.clone()) {
                excluded_prefixes.push(normalized);
            }
        }
    }

    excluded_prefixes
}

fn is_path_excluded(
    path: &Path,
    excluded_prefixes: &[PathBuf],
) -> bool {
    excluded_prefixes.iter().any(|excluded_prefix| path.starts_with(excluded_prefix))
}

#[cfg(test)]
#[path = "../../tests/src/server/indexing_tests.rs"]
mod tests;
