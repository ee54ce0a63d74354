//! Keep list maintenance: --add-keep, --del-keep, --list-keep, --zero-keep.

use std::path::Path;

use ds_core::{Dep, Error, find_duplicate};
use ds_io::{KeepFile, find_missing_package};

/// Run --zero-keep.
pub fn run_zero_keep(keep_file: &Path) -> Result<(), Error> {
    KeepFile::new(keep_file).zero()
}

/// Run --list-keep.
pub fn run_list_keep(keep_file: &Path) -> Result<(), Error> {
    for name in KeepFile::new(keep_file).list()? {
        println!("{}", name);
    }
    Ok(())
}

/// Run --add-keep. Every name must be a known package and not kept yet.
pub fn run_add_keep(keep_file: &Path, status_file: &Path, names: &[Dep]) -> Result<(), Error> {
    let keep = KeepFile::new(keep_file);

    if let Some(missing) = find_missing_package(status_file, names)? {
        return Err(Error::NoSuchPackage {
            name: missing.name().to_string(),
        });
    }

    let current = keep.read()?;
    if let Some(duplicate) = find_duplicate(&current, names) {
        return Err(Error::DuplicateKeep {
            name: duplicate.name().to_string(),
        });
    }

    keep.add(names)
}

/// Run --del-keep.
pub fn run_del_keep(keep_file: &Path, names: &[Dep]) -> Result<(), Error> {
    let removed = KeepFile::new(keep_file).remove(names)?;
    tracing::debug!(removed, "keep entries removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const STATUS: &str = "\
Package: libfoo1
Status: install ok installed

Package: libbar2
Status: install ok installed
";

    fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();
        let status = tmp.path().join("status");
        let keep = tmp.path().join("keep");
        fs::write(&status, STATUS).unwrap();
        (tmp, status, keep)
    }

    #[test]
    fn add_known_packages() {
        let (_tmp, status, keep) = setup();
        run_add_keep(&keep, &status, &[Dep::new("libfoo1"), Dep::new("libbar2")]).unwrap();
        assert_eq!(fs::read_to_string(&keep).unwrap(), "libfoo1\nlibbar2\n");
    }

    #[test]
    fn add_unknown_package_fails() {
        let (_tmp, status, keep) = setup();
        let err = run_add_keep(&keep, &status, &[Dep::new("libnope")]).unwrap_err();
        assert_eq!(
            err,
            Error::NoSuchPackage {
                name: "libnope".to_string()
            }
        );
        assert!(!keep.exists());
    }

    #[test]
    fn add_duplicate_fails() {
        let (_tmp, status, keep) = setup();
        fs::write(&keep, "libfoo1:amd64\n").unwrap();
        let err = run_add_keep(&keep, &status, &[Dep::new("libfoo1")]).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKeep {
                name: "libfoo1".to_string()
            }
        );
    }

    #[test]
    fn delete_then_nothing_left() {
        let (_tmp, status, keep) = setup();
        run_add_keep(&keep, &status, &[Dep::new("libfoo1")]).unwrap();
        run_del_keep(&keep, &[Dep::new("libfoo1")]).unwrap();
        assert_eq!(fs::read_to_string(&keep).unwrap(), "");
        assert_eq!(
            run_del_keep(&keep, &[Dep::new("libfoo1")]),
            Err(Error::NothingRemoved)
        );
    }

    #[test]
    fn zero_then_list() {
        let (_tmp, _status, keep) = setup();
        fs::write(&keep, "libfoo1\n").unwrap();
        run_zero_keep(&keep).unwrap();
        run_list_keep(&keep).unwrap();
        assert_eq!(fs::read_to_string(&keep).unwrap(), "");
    }
}
