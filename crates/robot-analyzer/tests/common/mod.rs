#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use tower_lsp::lsp_types::Position;
use url::Url;

pub const CURSOR: &str = "$0";

/// A scratch directory removed again on drop.
pub struct TempWorkspace {
    root: PathBuf,
}

impl TempWorkspace {
    pub fn new(test_name: &str) -> Self {
        let unique = SystemTime::now().duration_since(UNIX_EPOCH).expect("system time after UNIX_EPOCH").as_nanos();
        let root = std::env::temp_dir().join(format!("robot-analyzer-{test_name}-{}-{unique}", std::process::id()));
        std::fs::create_dir_all(&root).expect("create temporary workspace");
        Self {
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(
        &self,
        relative_path: &str,
    ) -> PathBuf {
        self.root.join(relative_path)
    }

    pub fn uri(
        &self,
        relative_path: &str,
    ) -> Url {
        Url::from_file_path(self.path(relative_path)).expect("workspace path is a valid file:// URI")
    }

    pub fn write(
        &self,
        relative_path: &str,
        contents: &str,
    ) -> PathBuf {
        let path = self.path(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directory");
        }
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Strip the `$0` marker from `source` and return the text together with the
/// LSP position (UTF-16 columns) the marker stood at.
pub fn split_cursor(source: &str) -> (String, Position) {
    let offset = source.find(CURSOR).expect("source must contain a cursor marker");
    let before = &source[..offset];
    let line = before.matches('\n').count() as u32;
    let line_text = before.rsplit_once('\n').map_or(before, |(_, tail)| tail);
    let character = line_text.encode_utf16().count() as u32;
    (source.replacen(CURSOR, "", 1), Position::new(line, character))
}
