//! The default command: list orphaned packages or the dependents of
//! packages named on the command line.

use std::path::Path;

use ds_core::{Dep, Error, ExcludeList, OrphanFinder, Options, SearchSet, merge_keep_lists};
use ds_io::{KeepFile, load_packages};

use crate::display::{Layout, print_findings};

/// Files the orphan scan reads.
#[derive(Debug, Clone, Copy)]
pub struct Paths<'a> {
    pub status_file: &'a Path,
    pub keep_file: &'a Path,
    /// debfoster keepers file to merge into the keep list.
    pub debfoster_file: Option<&'a Path>,
}

/// Load the keep list, merging in the debfoster keepers when requested.
pub fn load_keep_list(paths: &Paths<'_>) -> Result<Vec<Dep>, Error> {
    let keep = KeepFile::new(paths.keep_file).read()?;

    match paths.debfoster_file {
        Some(path) => {
            let debfoster = KeepFile::new(path).read()?;
            let merged = merge_keep_lists(keep, &debfoster);
            tracing::debug!(entries = merged.len(), "merged debfoster keepers");
            Ok(merged)
        }
        None => Ok(keep),
    }
}

/// Run the scan and print the findings.
///
/// With `targets`, only those packages are reported, and an empty target
/// list reports nothing. Returns the targets that matched no installed
/// package.
pub fn run_orphans(
    paths: &Paths<'_>,
    options: &Options,
    exclude: &ExcludeList,
    targets: Option<Vec<Dep>>,
) -> Result<Vec<Dep>, Error> {
    let keep = load_keep_list(paths)?;
    let db = load_packages(paths.status_file, options, exclude)?;

    let mut finder = OrphanFinder::new(options, &keep)?;
    if let Some(targets) = targets {
        finder = finder.with_search(SearchSet::new(targets));
    }

    let findings = finder.find(&db.packages);
    print_findings(&findings, Layout::new(options, db.multiarch));

    Ok(finder.unmatched().to_vec())
}
