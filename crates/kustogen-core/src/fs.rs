//! Filesystem access for manifest discovery and copying
//!
//! Two implementations are provided:
//! - `LocalFs`: The real filesystem
//! - `MemoryFs`: In-memory files for testing
//!
//! Both list files in the same order: recursively, with the entries of each
//! directory visited in file name order.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use walkdir::WalkDir;

/// Filesystem capability used by the collector and the kustomization builder
pub trait FileSystem: Send + Sync {
    /// List regular files below `root`, recursively, in walk order
    ///
    /// Returned paths are `root` joined with the file's relative path.
    fn list_files(&self, root: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read the contents of a file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write a file, creating missing parent directories
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Create a directory and all missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy every file below `from` into `to`, keeping the relative layout
    ///
    /// Not atomic: a failure leaves whatever was already copied in place.
    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.create_dir_all(to)?;
        for file in self.list_files(from)? {
            let relative = file.strip_prefix(from).map_err(io::Error::other)?;
            let contents = self.read(&file)?;
            self.write(&to.join(relative), &contents)?;
        }
        Ok(())
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_files(root)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).copy_tree(from, to)
    }
}

/// The real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::create_dir_all(to)?;
        for entry in WalkDir::new(from).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let relative = entry.path().strip_prefix(from).map_err(io::Error::other)?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else if entry.file_type().is_file() {
                std::fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }
}

/// In-memory filesystem for tests
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
    read_only: RwLock<Vec<PathBuf>>,
}

fn poisoned() -> io::Error {
    io::Error::other("memory filesystem lock poisoned")
}

impl MemoryFs {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path.as_ref(), content.into())
            .expect("memory filesystem lock poisoned");
        self
    }

    /// Make every write below `prefix` fail with `PermissionDenied`
    pub fn deny_writes_under(&self, prefix: impl Into<PathBuf>) {
        if let Ok(mut read_only) = self.read_only.write() {
            read_only.push(prefix.into());
        }
    }

    /// Check whether a file exists
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.files_read()
            .map(|files| files.contains_key(path.as_ref()))
            .unwrap_or(false)
    }

    fn files_read(&self) -> io::Result<RwLockReadGuard<'_, BTreeMap<PathBuf, Vec<u8>>>> {
        self.files.read().map_err(|_| poisoned())
    }

    fn files_write(&self) -> io::Result<RwLockWriteGuard<'_, BTreeMap<PathBuf, Vec<u8>>>> {
        self.files.write().map_err(|_| poisoned())
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        let read_only = self.read_only.read().map_err(|_| poisoned())?;
        if read_only.iter().any(|prefix| path.starts_with(prefix)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        Ok(())
    }

    fn insert(&self, path: &Path, contents: Vec<u8>) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            self.add_dirs(parent)?;
        }
        self.files_write()?.insert(path.to_path_buf(), contents);
        Ok(())
    }

    fn add_dirs(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.write().map_err(|_| poisoned())?;
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}

impl FileSystem for MemoryFs {
    fn list_files(&self, root: &Path) -> io::Result<Vec<PathBuf>> {
        let is_dir = self.dirs.read().map_err(|_| poisoned())?.contains(root);
        if !is_dir {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", root.display()),
            ));
        }

        Ok(self
            .files_read()?
            .keys()
            .filter(|path| path.starts_with(root) && path.as_path() != root)
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files_read()?.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.check_writable(path)?;
        self.insert(path, contents.to_vec())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check_writable(path)?;
        self.add_dirs(path)
    }
}
