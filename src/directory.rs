use std::io;
use std::path::{Path, PathBuf};

use crate::table_io::is_spreadsheet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Size formatted for the list view ("512 B", "1.5 KB").
    pub fn human_size(&self) -> String {
        if self.is_dir() {
            return String::new();
        }
        human_size(self.size)
    }

    /// Classify one raw directory entry. Unreadable entries, broken links,
    /// hidden names and non-spreadsheet files give `None`.
    fn from_fs(entry: io::Result<std::fs::DirEntry>) -> Option<Self> {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                return None;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            return None;
        }

        // Follows symlinks; broken links are skipped
        let metadata = std::fs::metadata(entry.path()).ok()?;

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if is_spreadsheet(&entry.path()) {
            EntryKind::File
        } else {
            return None;
        };

        Some(DirEntry {
            name,
            path: entry.path(),
            kind,
            size: if kind == EntryKind::File { metadata.len() } else { 0 },
        })
    }
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// The spreadsheets and sub-directories of one directory.
#[derive(Clone, Debug)]
pub struct DirectoryListing {
    dir: PathBuf,
    entries: Vec<DirEntry>,
}

impl DirectoryListing {
    /// List `dir`, keeping sub-directories and spreadsheet files.
    ///
    /// Hidden entries are skipped; directories sort before files, then by
    /// name ignoring case.
    pub fn read(dir: &Path) -> io::Result<Self> {
        let mut entries: Vec<DirEntry> = std::fs::read_dir(dir)?
            .filter_map(DirEntry::from_fs)
            .collect();

        entries.sort_by(|a, b| {
            b.is_dir()
                .cmp(&a.is_dir())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
        })
    }

    /// A listing with no entries, shown when `dir` cannot be read.
    pub fn empty(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            entries: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn parent(&self) -> Option<&Path> {
        self.dir.parent()
    }
}

/// Directory the chooser opens in: the working directory, else home, else root.
pub fn start_dir() -> PathBuf {
    std::env::current_dir()
        .ok()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_filters_and_orders() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.xlsx"), b"").unwrap();
        std::fs::write(dir.path().join("A.csv"), b"x").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"").unwrap();
        std::fs::write(dir.path().join(".hidden.xlsx"), b"").unwrap();
        std::fs::create_dir(dir.path().join("zeta")).unwrap();
        std::fs::create_dir(dir.path().join("Alpha")).unwrap();

        let listing = DirectoryListing::read(dir.path()).unwrap();
        let names: Vec<&str> = listing.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "zeta", "A.csv", "b.xlsx"]);
        assert!(listing.entries()[0].is_dir());
        assert_eq!(listing.entries()[2].size, 1);
        assert_eq!(listing.parent(), dir.path().parent());
    }

    #[test]
    fn test_unreadable_entry_is_skipped() {
        let entry = Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(DirEntry::from_fs(entry), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_link_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("kept.csv"), b"a").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.csv"), dir.path().join("dangling.csv"))
            .unwrap();

        let listing = DirectoryListing::read(dir.path()).unwrap();
        let names: Vec<&str> = listing.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["kept.csv"]);
    }

    #[test]
    fn test_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DirectoryListing::read(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn test_directory_has_no_size_label() {
        let entry = DirEntry {
            name: "docs".into(),
            path: PathBuf::from("docs"),
            kind: EntryKind::Directory,
            size: 4096,
        };
        assert_eq!(entry.human_size(), "");
    }
}
