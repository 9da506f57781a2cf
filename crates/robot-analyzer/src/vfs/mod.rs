use std::path::{Component, Path, PathBuf};

use tower_lsp::lsp_types::Url;

/// Identity of a source file: a normalized path for files on disk, or the
/// raw URI for buffers that have no path (e.g. `untitled:`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(String);

impl FileId {
    pub fn from_path(path: &Path) -> Self {
        Self(normalized_path(path).display().to_string())
    }

    pub fn from_url(url: &Url) -> Self {
        if let Ok(path) = url.to_file_path() {
            return Self::from_path(&path);
        }
        Self(url.as_str().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The on-disk path, when this id names one.
    pub fn to_path(&self) -> Option<PathBuf> {
        let path = Path::new(&self.0);
        path.is_absolute().then(|| path.to_path_buf())
    }

    pub fn to_url(&self) -> Option<Url> {
        match self.to_path() {
            Some(path) => Url::from_file_path(path).ok(),
            None => Url::parse(&self.0).ok(),
        }
    }

    /// Last path segment, for log lines and completion details.
    pub fn short_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for FileId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical path when the file exists, otherwise a lexically cleaned one
/// (`.` dropped, `..` folded into its parent).
pub fn normalized_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| lexically_normalized(path))
}

fn lexically_normalized(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            },
            other => normalized.push(other),
        }
    }
    normalized
}
