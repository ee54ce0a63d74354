use crate::dep::Dep;

/// Packages to treat as if they were not installed.
///
/// Kept sorted by name for binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeList {
    entries: Vec<Dep>,
}

impl ExcludeList {
    /// Build from `--exclude` values; each may hold a comma separated list
    /// of names with optional `:arch` suffixes, which are dropped.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let mut entries: Vec<Dep> = args
            .iter()
            .flat_map(|arg| arg.as_ref().split(','))
            .filter_map(Dep::from_relation)
            .collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        ExcludeList { entries }
    }

    pub fn contains(&self, dep: &Dep) -> bool {
        self.entries
            .binary_search_by(|e| e.name().cmp(dep.name()))
            .is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
