//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait allows the sampler to work with both the real
//! sysfs tree on Linux and mock implementations for testing off-Linux or
//! in CI. Unlike a read-the-whole-file abstraction, `open` hands back a
//! live handle: the sampler keeps counter files open across its lifetime
//! and re-reads them from offset 0 on every refresh.

use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Handle type returned by `open`, seekable so it can be rewound
    /// before each re-read.
    type File: Read + Seek;

    /// Opens a file read-only and returns a live handle to it.
    ///
    /// # Arguments
    /// * `path` - Path to the file to open
    fn open(&self, path: &Path) -> io::Result<Self::File>;

    /// Lists entries in a directory.
    ///
    /// Also serves as the existence probe for interface directories: a
    /// directory that can be opened and enumerated exists.
    ///
    /// # Arguments
    /// * `path` - Path to the directory
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual sysfs tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    type File = std::fs::File;

    fn open(&self, path: &Path) -> io::Result<Self::File> {
        std::fs::File::open(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}
