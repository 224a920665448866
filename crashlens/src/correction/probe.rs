use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers "does this file exist"
pub trait FileProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

impl FileProbe for DiskProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Fixed set of paths that exist; everything else doesn't
#[derive(Debug, Clone, Default)]
pub struct KnownFiles {
    files: HashSet<PathBuf>,
}

impl KnownFiles {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self { files: files.into_iter().map(Into::into).collect() }
    }
}

impl FileProbe for KnownFiles {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

impl<T: FileProbe + ?Sized> FileProbe for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}
