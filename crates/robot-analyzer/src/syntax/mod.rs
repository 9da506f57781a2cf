pub mod kind;
pub mod lexer;
pub mod line;
pub mod parser;
pub mod whitespace;

use std::{
    fmt::{self, Display, Formatter},
    fs::Metadata,
    ops::Range,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::SystemTime,
};

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;

pub use kind::{LineKind, Table};
pub use line::{ArgumentCell, Line};
pub use parser::{parse_lines, split_cells};
pub use whitespace::{separator_at, skip_minimum_separator};

use crate::{document::DocumentView, vfs::FileId};

const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 512 * 1024;

/// Immutable parse of one file: the source snapshot and its lines.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    source: Arc<str>,
    lines: Vec<Line>,
}

impl ParsedFile {
    pub fn parse(source: &str) -> Self {
        Self {
            lines: parse_lines(source),
            source: Arc::from(source),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(
        &self,
        index: usize,
    ) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_text(
        &self,
        index: usize,
    ) -> Option<&str> {
        let line = self.lines.get(index)?;
        self.source.get(line.start()..line.end())
    }
}

impl DocumentView for ParsedFile {
    fn line_of_offset(
        &self,
        offset: usize,
    ) -> Option<usize> {
        if offset > self.source.len() {
            return None;
        }
        self.lines.partition_point(|line| line.start() <= offset).checked_sub(1)
    }

    fn line_range(
        &self,
        line: usize,
    ) -> Option<Range<usize>> {
        self.lines.get(line).map(|line| line.start()..line.end())
    }

    fn text(
        &self,
        range: Range<usize>,
    ) -> Option<&str> {
        self.source.get(range)
    }
}

/// Why a file that is not open in the editor could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    NotOnDisk(FileId),
    TooLarge {
        file: FileId,
        size: u64,
        limit: u64,
    },
    Io {
        file: FileId,
        reason: String,
    },
}

impl Display for LoadError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NotOnDisk(file) => write!(f, "{file} is not a file on disk"),
            Self::TooLarge {
                file,
                size,
                limit,
            } => write!(f, "{file} is {size} bytes, above the {limit} byte limit"),
            Self::Io {
                file,
                reason,
            } => write!(f, "failed to read {file}: {reason}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Size and modification time of a file when its snapshot was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DiskStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl DiskStamp {
    fn of(metadata: &Metadata) -> Self {
        Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    parsed: Arc<ParsedFile>,
    /// `None` for editor buffers, which are never revalidated against disk.
    disk: Option<DiskStamp>,
}

/// Thread-safe cache of parsed files, keyed by file identity.
///
/// Every entry is a complete snapshot. Updates replace the whole `Arc`, so a
/// reader that cloned a snapshot never observes a partially rebuilt file.
/// Snapshots read from disk are reloaded once the file's size or
/// modification time changes.
pub struct ParseCache {
    files: DashMap<FileId, CacheEntry>,
    max_file_size: AtomicU64,
}

impl ParseCache {
    pub fn new() -> Self {
        Self {
            files: DashMap::new(),
            max_file_size: AtomicU64::new(DEFAULT_MAX_FILE_SIZE_BYTES),
        }
    }

    /// Full reparse of an editor buffer, replacing any existing snapshot.
    pub fn update(
        &self,
        file: FileId,
        source: &str,
    ) -> Arc<ParsedFile> {
        let parsed = Arc::new(ParsedFile::parse(source));
        self.files.insert(file, CacheEntry {
            parsed: Arc::clone(&parsed),
            disk: None,
        });
        parsed
    }

    /// Store a snapshot of `source`, read from disk, unless the file is
    /// already cached. Used by background indexing so it never overwrites a
    /// buffer the editor has open.
    pub fn insert_if_absent(
        &self,
        file: FileId,
        source: &str,
    ) -> bool {
        if self.files.contains_key(&file) {
            return false;
        }
        let disk = file.to_path().and_then(|path| std::fs::metadata(path).ok()).map(|metadata| DiskStamp::of(&metadata));
        let parsed = Arc::new(ParsedFile::parse(source));
        let mut inserted = false;
        self.files.entry(file).or_insert_with(|| {
            inserted = true;
            CacheEntry {
                parsed,
                disk,
            }
        });
        inserted
    }

    /// Get an Arc-cloned snapshot. No lock held after return.
    pub fn get(
        &self,
        file: &FileId,
    ) -> Option<Arc<ParsedFile>> {
        self.files.get(file).map(|entry| Arc::clone(&entry.value().parsed))
    }

    pub fn contains(
        &self,
        file: &FileId,
    ) -> bool {
        self.files.contains_key(file)
    }

    /// Return the cached snapshot or read and parse the file from disk.
    ///
    /// Editor buffers are returned as they are. Snapshots that came from disk
    /// are checked against the file's current size and modification time
    /// and reread when either differs.
    pub fn get_or_load(
        &self,
        file: &FileId,
    ) -> Result<Arc<ParsedFile>, LoadError> {
        let cached = self.files.get(file).map(|entry| entry.value().clone());
        if let Some(CacheEntry {
            parsed,
            disk: None,
        }) = &cached
        {
            return Ok(Arc::clone(parsed));
        }

        let path = file.to_path().ok_or_else(|| LoadError::NotOnDisk(file.clone()))?;
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) => {
                self.forget_disk_snapshot(file);
                return Err(LoadError::Io {
                    file: file.clone(),
                    reason: error.to_string(),
                });
            },
        };
        if !metadata.is_file() {
            self.forget_disk_snapshot(file);
            return Err(LoadError::NotOnDisk(file.clone()));
        }

        let stamp = DiskStamp::of(&metadata);
        if let Some(CacheEntry {
            parsed,
            disk: Some(disk),
        }) = &cached
            && *disk == stamp
        {
            return Ok(Arc::clone(parsed));
        }

        let limit = self.max_file_size.load(Ordering::Relaxed);
        if metadata.len() > limit {
            self.forget_disk_snapshot(file);
            return Err(LoadError::TooLarge {
                file: file.clone(),
                size: metadata.len(),
                limit,
            });
        }

        let source = std::fs::read_to_string(&path).map_err(|error| LoadError::Io {
            file: file.clone(),
            reason: error.to_string(),
        })?;
        debug!("[parse-cache] loaded {} ({} bytes) from disk", file.short_name(), source.len());

        let loaded = CacheEntry {
            parsed: Arc::new(ParsedFile::parse(&source)),
            disk: Some(stamp),
        };
        let parsed = match self.files.entry(file.clone()) {
            // The editor opened the file meanwhile; its buffer wins.
            Entry::Occupied(entry) if entry.get().disk.is_none() => Arc::clone(&entry.get().parsed),
            Entry::Occupied(mut entry) => {
                let parsed = Arc::clone(&loaded.parsed);
                entry.insert(loaded);
                parsed
            },
            Entry::Vacant(entry) => Arc::clone(&entry.insert(loaded).parsed),
        };
        Ok(parsed)
    }

    /// Drop a snapshot that came from disk; editor buffers stay.
    fn forget_disk_snapshot(
        &self,
        file: &FileId,
    ) {
        self.files.remove_if(file, |_, entry| entry.disk.is_some());
    }

    pub fn remove(
        &self,
        file: &FileId,
    ) {
        self.files.remove(file);
    }

    pub fn set_max_file_size(
        &self,
        bytes: u64,
    ) {
        self.max_file_size.store(bytes, Ordering::Relaxed);
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/src/syntax/parse_cache_tests.rs"]
mod tests;
