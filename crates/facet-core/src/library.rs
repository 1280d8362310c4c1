//! Content library: a directory of folders holding OBJ files

use std::path::{Path, PathBuf};

/// Content library errors
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file or folder in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Read-only view over `root/<folder>/<file>.obj`.
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    root: PathBuf,
}

impl ContentLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Sub-directories of the root, sorted by name.
    pub fn folders(&self) -> Result<Vec<LibraryEntry>, LibraryError> {
        list(&self.root, |path| path.is_dir())
    }

    /// `.obj` files inside `folder`, sorted by name.
    pub fn obj_files(&self, folder: &Path) -> Result<Vec<LibraryEntry>, LibraryError> {
        list(folder, |path| path.is_file() && is_obj(path))
    }
}

pub fn is_obj(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("obj"))
}

fn list(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<LibraryEntry>, LibraryError> {
    let read = std::fs::read_dir(dir).map_err(|source| LibraryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<LibraryEntry> = read
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| keep(path))
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            Some(LibraryEntry { name, path })
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
