//! The keep file on disk.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use ds_core::{Dep, Error, append_entries, keep_entry_name, parse_keep_list, remove_entries};

/// Default keep file.
pub const DEFAULT_KEEP_FILE: &str = "/var/lib/deborphan/keep";

/// Default debfoster keepers file, merged in with `--df-keep`.
pub const DEFAULT_DEBFOSTER_FILE: &str = "/var/lib/debfoster/keepers";

/// A keep file at a fixed path.
#[derive(Debug, Clone)]
pub struct KeepFile {
    path: PathBuf,
}

impl KeepFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file content; a missing file reads as empty.
    fn content(&self) -> Result<String, Error> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "keep file does not exist");
                Ok(String::new())
            }
            Err(e) => Err(Error::io(&self.path, &e)),
        }
    }

    /// Entries in file order.
    pub fn read(&self) -> Result<Vec<Dep>, Error> {
        let entries = parse_keep_list(&self.content()?);
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "read keep file");
        Ok(entries)
    }

    /// Bare entry names, as printed by `--list-keep`.
    pub fn list(&self) -> Result<Vec<String>, Error> {
        Ok(self
            .content()?
            .lines()
            .filter_map(keep_entry_name)
            .map(str::to_string)
            .collect())
    }

    /// Append `names`, creating the file if needed.
    pub fn add(&self, names: &[Dep]) -> Result<(), Error> {
        let existing = self.content()?;
        let addition = append_entries(&existing, names);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, &e))?;
        file.write_all(addition.as_bytes())
            .map_err(|e| Error::io(&self.path, &e))?;

        tracing::debug!(added = names.len(), "appended keep entries");
        Ok(())
    }

    /// Remove every entry named in `names`. Returns the number of lines
    /// removed; removing nothing is an error.
    pub fn remove(&self, names: &[Dep]) -> Result<usize, Error> {
        let content = self.content()?;
        let (kept, removed) = remove_entries(&content, names);

        if removed == 0 {
            return Err(Error::NothingRemoved);
        }

        fs::write(&self.path, kept).map_err(|e| Error::io(&self.path, &e))?;
        Ok(removed)
    }

    /// Truncate the file. A missing file is left missing.
    pub fn zero(&self) -> Result<(), Error> {
        match OpenOptions::new().write(true).truncate(true).open(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.path, &e)),
        }
    }
}
