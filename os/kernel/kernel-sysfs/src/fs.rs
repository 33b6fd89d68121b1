use crate::{FileMode, SysfsError};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kernel_sync::SpinMutex;
use log::{trace, warn};

/// The place where namespaces and their attribute files become visible.
///
/// Creation may fail; removal is best effort and never reports an error,
/// since teardown has to complete regardless.
pub trait PseudoFs: Send + Sync {
    /// # Errors
    /// [`SysfsError::AlreadyExists`] if `dir` exists, or any backend failure.
    fn create_dir(&self, dir: &str) -> Result<(), SysfsError>;

    fn remove_dir(&self, dir: &str);

    /// # Errors
    /// [`SysfsError::NotFound`] if `dir` does not exist,
    /// [`SysfsError::AlreadyExists`] if `name` does, or any backend failure.
    fn create_file(&self, dir: &str, name: &str, mode: FileMode) -> Result<(), SysfsError>;

    fn remove_file(&self, dir: &str, name: &str);
}

/// A listed attribute file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub mode: FileMode,
}

/// In-memory [`PseudoFs`]: one level of directories holding files in
/// creation order.
///
/// ```rust
/// # use kernel_sysfs::*;
/// let root = SysfsRoot::new();
/// root.create_dir("dev")?;
/// root.create_file("dev", "level", FileMode::RW)?;
/// assert_eq!(root.list("dev").unwrap()[0].name, "level");
/// assert_eq!(root.create_file("nope", "x", FileMode::RO), Err(SysfsError::NotFound));
/// # Ok::<(), SysfsError>(())
/// ```
#[derive(Debug, Default)]
pub struct SysfsRoot {
    dirs: SpinMutex<BTreeMap<String, Vec<DirEntry>>>,
}

impl SysfsRoot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dirs: SpinMutex::new(BTreeMap::new()),
        }
    }

    /// Files of `dir` in creation order, or `None` if there is no such
    /// directory.
    #[must_use]
    pub fn list(&self, dir: &str) -> Option<Vec<DirEntry>> {
        self.dirs.with_lock(|d| d.get(dir).cloned())
    }

    /// All directory names, sorted.
    #[must_use]
    pub fn list_dirs(&self) -> Vec<String> {
        self.dirs.with_lock(|d| d.keys().cloned().collect())
    }

    #[must_use]
    pub fn contains_dir(&self, dir: &str) -> bool {
        self.dirs.with_lock(|d| d.contains_key(dir))
    }

    #[must_use]
    pub fn lookup(&self, dir: &str, name: &str) -> Option<DirEntry> {
        self.dirs
            .with_lock(|d| d.get(dir)?.iter().find(|e| e.name == name).cloned())
    }
}

impl PseudoFs for SysfsRoot {
    fn create_dir(&self, dir: &str) -> Result<(), SysfsError> {
        self.dirs.with_lock(|d| {
            if d.contains_key(dir) {
                return Err(SysfsError::AlreadyExists);
            }
            d.insert(dir.to_string(), Vec::new());
            trace!("mkdir {dir}");
            Ok(())
        })
    }

    fn remove_dir(&self, dir: &str) {
        match self.dirs.with_lock(|d| d.remove(dir)) {
            None => warn!("rmdir {dir}: no such directory"),
            Some(left) if !left.is_empty() => {
                warn!("rmdir {dir}: dropping {} remaining file(s)", left.len());
            }
            Some(_) => trace!("rmdir {dir}"),
        }
    }

    fn create_file(&self, dir: &str, name: &str, mode: FileMode) -> Result<(), SysfsError> {
        self.dirs.with_lock(|d| {
            let files = d.get_mut(dir).ok_or(SysfsError::NotFound)?;
            if files.iter().any(|e| e.name == name) {
                return Err(SysfsError::AlreadyExists);
            }
            files.push(DirEntry {
                name: name.to_string(),
                mode,
            });
            trace!("create {dir}/{name} ({mode})");
            Ok(())
        })
    }

    fn remove_file(&self, dir: &str, name: &str) {
        let removed = self.dirs.with_lock(|d| {
            let files = d.get_mut(dir)?;
            let at = files.iter().position(|e| e.name == name)?;
            Some(files.remove(at))
        });
        if removed.is_some() {
            trace!("unlink {dir}/{name}");
        } else {
            warn!("unlink {dir}/{name}: no such file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_rejected() {
        let root = SysfsRoot::new();
        root.create_dir("a").unwrap();
        assert_eq!(root.create_dir("a"), Err(SysfsError::AlreadyExists));
        root.create_file("a", "f", FileMode::RO).unwrap();
        assert_eq!(
            root.create_file("a", "f", FileMode::RO),
            Err(SysfsError::AlreadyExists)
        );
    }

    #[test]
    fn files_keep_creation_order() {
        let root = SysfsRoot::new();
        root.create_dir("a").unwrap();
        for name in ["z", "b", "m"] {
            root.create_file("a", name, FileMode::RO).unwrap();
        }
        let names: Vec<_> = root.list("a").unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["z", "b", "m"]);

        root.remove_file("a", "b");
        assert!(root.lookup("a", "b").is_none());
        assert_eq!(root.lookup("a", "m").unwrap().mode, FileMode::RO);
    }

    #[test]
    fn removal_of_missing_entries_is_harmless() {
        let root = SysfsRoot::new();
        root.remove_dir("ghost");
        root.remove_file("ghost", "f");
        root.create_dir("a").unwrap();
        root.create_file("a", "f", FileMode::RO).unwrap();
        root.remove_dir("a");
        assert!(root.list_dirs().is_empty());
    }
}
