use crate::dep::Dep;

/// One stanza of the status file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PkgInfo {
    /// The package itself; its arch comes from the `Architecture` field.
    /// Empty until the `Package` field has been seen.
    pub package: Dep,
    pub priority: i32,
    /// Names this package satisfies besides its own.
    pub provides: Vec<Dep>,
    /// Section with the archive area prefix, e.g. `main/libs`.
    pub section: Option<String>,
    /// Union of Depends, Pre-Depends, Recommends and Suggests, without duplicates.
    pub deps: Vec<Dep>,
    pub install: bool,
    pub hold: bool,
    pub essential: bool,
    /// Description marks this as a dummy or transitional package.
    pub dummy: bool,
    /// Only configuration files of this package remain.
    pub config: bool,
    /// Installed size in KiB.
    pub installed_size: i64,
}

impl PkgInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        self.package.name()
    }

    pub fn arch(&self) -> Option<&str> {
        self.package.arch()
    }

    pub fn has_name(&self) -> bool {
        !self.package.name().is_empty()
    }

    pub fn display_name(&self, with_arch: bool) -> String {
        self.package.display_name(with_arch)
    }

    /// Add a dependency unless an equal one is already recorded.
    ///
    /// Returns false when the dependency was a duplicate.
    pub fn add_dep(&mut self, dep: Dep) -> bool {
        if self.deps.iter().any(|d| *d == dep) {
            return false;
        }
        self.deps.push(dep);
        true
    }

    /// Whether `dep` names this package or something it provides.
    pub fn satisfies(&self, dep: &Dep) -> bool {
        self.provides.iter().any(|p| p == dep) || self.package == *dep
    }

    /// Ends in `-dev` or `-dbg` (but is not just the suffix).
    pub fn is_dev(&self) -> bool {
        let name = self.name();
        ["-dev", "-dbg"]
            .iter()
            .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> PkgInfo {
        PkgInfo {
            package: Dep::new(name),
            ..Default::default()
        }
    }

    #[test]
    fn new_record_is_empty() {
        let pkg = PkgInfo::new();
        assert!(!pkg.has_name());
        assert_eq!(pkg.name(), "");
        assert!(pkg.deps.is_empty());
        assert!(pkg.provides.is_empty());
        assert!(!pkg.install);
        assert_eq!(pkg.installed_size, 0);
    }

    #[test]
    fn add_dep_drops_duplicates() {
        let mut pkg = named("app");
        assert!(pkg.add_dep(Dep::new("libc6")));
        assert!(!pkg.add_dep(Dep::new("libc6")));
        assert!(pkg.add_dep(Dep::new("zlib1g")));
        assert_eq!(pkg.deps.len(), 2);
    }

    #[test]
    fn satisfies_own_name_and_provides() {
        let mut pkg = named("libfoo1");
        pkg.provides.push(Dep::new("libfoo-abi-1"));
        assert!(pkg.satisfies(&Dep::new("libfoo1")));
        assert!(pkg.satisfies(&Dep::new("libfoo-abi-1")));
        assert!(!pkg.satisfies(&Dep::new("libfoo2")));
    }

    #[test]
    fn satisfies_ignores_architecture() {
        let mut pkg = named("libfoo1");
        pkg.package.set_arch(Some("amd64".to_string()));
        assert!(pkg.satisfies(&Dep::new("libfoo1")));
    }

    #[test]
    fn dev_suffixes() {
        assert!(named("libfoo-dev").is_dev());
        assert!(named("libfoo-dbg").is_dev());
        assert!(!named("libfoo-dbgsym").is_dev());
        assert!(!named("-dev").is_dev());
        assert!(!named("libfoo1").is_dev());
    }

    #[test]
    fn display_name_with_arch() {
        let mut pkg = named("libfoo1");
        assert_eq!(pkg.display_name(true), "libfoo1");
        pkg.package.set_arch(Some("i386".to_string()));
        assert_eq!(pkg.display_name(true), "libfoo1:i386");
        assert_eq!(pkg.display_name(false), "libfoo1");
        assert_eq!(pkg.arch(), Some("i386"));
    }
}
