//! Loading the dpkg status database from disk.

use std::fs;
use std::path::Path;

use ds_core::{Dep, Error, ExcludeList, Options, StatusDb, parse_status, strip_char};

/// Default location of the dpkg status database.
pub const DEFAULT_STATUS_FILE: &str = "/var/lib/dpkg/status";

/// Read the whole status file into memory.
pub fn read_status_file(path: &Path) -> Result<String, Error> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, &e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read status file");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read and parse the status file at `path`.
pub fn load_packages(
    path: &Path,
    options: &Options,
    exclude: &ExcludeList,
) -> Result<StatusDb, Error> {
    let content = read_status_file(path)?;
    parse_status(&content, options, exclude)
}

/// The first of `names` with no `Package:` line in the status file.
///
/// Spaces are ignored when comparing and the field name's first letter may
/// be either case.
pub fn find_missing_package<'a>(
    path: &Path,
    names: &'a [Dep],
) -> Result<Option<&'a Dep>, Error> {
    let content = read_status_file(path)?;

    let listed: Vec<String> = content
        .lines()
        .filter(|line| line.starts_with(['P', 'p']))
        .map(|line| strip_char(line, ' '))
        .filter_map(|line| {
            line.get(1..)
                .and_then(|rest| rest.strip_prefix("ackage:"))
                .map(str::to_string)
        })
        .collect();

    Ok(names
        .iter()
        .find(|name| !listed.iter().any(|pkg| pkg == name.name())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STATUS: &str = "\
Package: libfoo1
Status: install ok installed
Section: libs
Priority: optional

package: libbar2
Status: install ok installed
Section: libs
Priority: optional
Depends: libfoo1
";

    fn write_status(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("status");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_status_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_status_file(&tmp.path().join("nope")).unwrap_err();
        match err {
            Error::Io { path, .. } => assert!(path.ends_with("nope")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_packages_parses_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_status(&tmp, STATUS);

        let db = load_packages(&path, &Options::default(), &ExcludeList::default()).unwrap();
        let names: Vec<&str> = db.packages.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["libfoo1", "libbar2"]);
    }

    #[test]
    fn find_missing_package_reports_first_unknown() {
        let tmp = TempDir::new().unwrap();
        let path = write_status(&tmp, STATUS);

        let present = vec![Dep::new("libfoo1"), Dep::new("libbar2")];
        assert_eq!(find_missing_package(&path, &present).unwrap(), None);

        let names = vec![Dep::new("libfoo1"), Dep::new("libnope"), Dep::new("libgone")];
        let missing = find_missing_package(&path, &names).unwrap();
        assert_eq!(missing.map(Dep::name), Some("libnope"));
    }

    #[test]
    fn find_missing_package_needs_exact_name() {
        let tmp = TempDir::new().unwrap();
        let path = write_status(&tmp, STATUS);

        let names = vec![Dep::new("libfoo")];
        let missing = find_missing_package(&path, &names).unwrap();
        assert_eq!(missing.map(Dep::name), Some("libfoo"));
    }
}
