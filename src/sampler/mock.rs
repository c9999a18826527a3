//! In-memory mock filesystem for testing the sampler without real sysfs.
//!
//! `MockFs` simulates a filesystem in memory, allowing tests to run on
//! macOS and in CI environments without a Linux network interface. File
//! contents live behind shared state, so a handle opened before a rewrite
//! observes the new content on its next rewound read. That mirrors sysfs
//! pseudo-files, whose content is regenerated by the kernel on each read.

use crate::sampler::traits::FileSystem;
use crate::sampler::{DEFAULT_SYSFS_PATH, RxCounter, TxCounter};
use std::collections::{HashMap, HashSet};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MockState {
    /// Map from path to file contents.
    files: HashMap<PathBuf, Vec<u8>>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
}

/// In-memory filesystem for testing.
///
/// Cloning shares the underlying state, so a test can keep one `MockFs`
/// around to rewrite file contents while a sampler holds another.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    state: Arc<Mutex<MockState>>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or rewrites) a file with the given content.
    ///
    /// Parent directories are automatically created. Rewriting is visible
    /// to handles already opened on the path.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        let mut state = self.state.lock().unwrap();

        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                state.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }

        state.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut state = self.state.lock().unwrap();
        state.directories.insert(path.clone());

        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                state.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }

    /// Removes a file, leaving directories in place.
    pub fn remove_file(&self, path: impl AsRef<Path>) {
        let mut state = self.state.lock().unwrap();
        state.files.remove(path.as_ref());
    }

    /// Adds an interface under the default sysfs path with every receive
    /// and transmit counter file present, all reading `0`.
    pub fn with_interface(name: &str) -> Self {
        let fs = Self::new();
        fs.add_interface(name);
        fs
    }

    /// Adds an interface directory and its full statistics set, all `0`.
    pub fn add_interface(&self, name: &str) {
        let stats = Path::new(DEFAULT_SYSFS_PATH).join(name).join("statistics");
        self.add_dir(Path::new(DEFAULT_SYSFS_PATH).join(name));
        for c in RxCounter::ALL {
            self.add_file(stats.join(c.filename()), "0\n");
        }
        for c in TxCounter::ALL {
            self.add_file(stats.join(c.filename()), "0\n");
        }
    }
}

impl FileSystem for MockFs {
    type File = MockFile;

    fn open(&self, path: &Path) -> io::Result<Self::File> {
        let state = self.state.lock().unwrap();
        if !state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            ));
        }
        Ok(MockFile {
            state: Arc::clone(&self.state),
            path: path.to_path_buf(),
            pos: 0,
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.state.lock().unwrap();
        if !state.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = HashSet::new();
        for file_path in state.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }
        for dir_path in &state.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }

        Ok(entries.into_iter().collect())
    }
}

/// Open handle into a `MockFs` file.
///
/// Reads go through the shared state on every call, so content rewritten
/// after the open is what a rewound read returns.
#[derive(Debug)]
pub struct MockFile {
    state: Arc<Mutex<MockState>>,
    path: PathBuf,
    pos: u64,
}

impl Read for MockFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let state = self.state.lock().unwrap();
        let content = state.files.get(&self.path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("file gone: {:?}", self.path))
        })?;

        let start = (self.pos as usize).min(content.len());
        let n = (content.len() - start).min(buf.len());
        buf[..n].copy_from_slice(&content[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for MockFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let new_pos = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::Current(delta) => self.pos as i64 + delta,
            SeekFrom::End(delta) => {
                let state = self.state.lock().unwrap();
                let len = state.files.get(&self.path).map_or(0, |c| c.len());
                len as i64 + delta
            }
        };
        if new_pos < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of file",
            ));
        }
        self.pos = new_pos as u64;
        Ok(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let fs = MockFs::new();
        fs.add_file("/sys/class/net/eth0/statistics/rx_bytes", "1234\n");

        let mut file = fs
            .open(Path::new("/sys/class/net/eth0/statistics/rx_bytes"))
            .unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "1234\n");

        // Parent directories were created implicitly.
        assert!(fs.read_dir(Path::new("/sys/class/net/eth0")).is_ok());
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let result = fs.open(Path::new("/nonexistent"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
        let result = fs.read_dir(Path::new("/nonexistent"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_handle_sees_rewrites() {
        let fs = MockFs::new();
        fs.add_file("/f", "1000");
        let mut file = fs.open(Path::new("/f")).unwrap();

        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "1000");

        fs.add_file("/f", "2500");
        file.seek(SeekFrom::Start(0)).unwrap();
        content.clear();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "2500");
    }

    #[test]
    fn test_with_interface_has_full_statistics_set() {
        let fs = MockFs::with_interface("eth0");
        let stats = Path::new(DEFAULT_SYSFS_PATH).join("eth0").join("statistics");
        let entries = fs.read_dir(&stats).unwrap();
        assert_eq!(entries.len(), 21);
    }

    #[test]
    fn test_clone_shares_state() {
        let fs = MockFs::new();
        let other = fs.clone();
        other.add_file("/f", "7");
        assert!(fs.open(Path::new("/f")).is_ok());
    }
}
