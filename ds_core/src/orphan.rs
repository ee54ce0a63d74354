//! Orphan detection.
//!
//! A candidate is examined unless it is exempt: held, below the minimum
//! priority, on the keep list, not library-like, or (when searching for
//! configuration remnants) still installed. Every installed package's
//! relationship list is then scanned for an entry the candidate satisfies,
//! either by its own name or by one of its `Provides`.
//!
//! A package that lists itself as a dependency counts as its own dependent.
//! With multiarch, `foo:i386` may legitimately depend on `foo:amd64`, and
//! relationship entries carry no architecture to tell the two apart.

use crate::classify::Classifier;
use crate::dep::Dep;
use crate::errors::Error;
use crate::keep::is_kept;
use crate::options::Options;
use crate::package::PkgInfo;

/// What the engine reports for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding<'a> {
    /// Nothing depends on the package.
    Orphan(&'a PkgInfo),
    /// The package and every package depending on it, in file order.
    /// Only produced when dependents are being shown.
    Dependents {
        package: &'a PkgInfo,
        dependents: Vec<&'a PkgInfo>,
    },
}

/// Package names the user asked about explicitly.
///
/// Each target is consumed by the first candidate it matches; whatever is
/// left after a run was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSet {
    targets: Vec<Dep>,
}

impl SearchSet {
    pub fn new(targets: Vec<Dep>) -> Self {
        Self { targets }
    }

    /// Remove and report the target matching `package`.
    ///
    /// The architecture only has to agree when both sides name one.
    pub fn take(&mut self, package: &Dep) -> bool {
        let found = self.targets.iter().position(|target| {
            target.name() == package.name()
                && match (target.arch(), package.arch()) {
                    (Some(wanted), Some(actual)) => wanted == actual,
                    _ => true,
                }
        });
        match found {
            Some(index) => {
                self.targets.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Targets not matched by any candidate so far.
    pub fn remaining(&self) -> &[Dep] {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Walks the package list once per candidate looking for dependents.
pub struct OrphanFinder<'a> {
    options: &'a Options,
    classifier: Classifier<'a>,
    keep: &'a [Dep],
    search: Option<SearchSet>,
}

impl<'a> OrphanFinder<'a> {
    pub fn new(options: &'a Options, keep: &'a [Dep]) -> Result<Self, Error> {
        Ok(Self {
            options,
            classifier: Classifier::new(options)?,
            keep,
            search: None,
        })
    }

    /// Only report the given packages.
    pub fn with_search(mut self, search: SearchSet) -> Self {
        self.search = Some(search);
        self
    }

    /// Search targets that have not been matched yet.
    pub fn unmatched(&self) -> &[Dep] {
        match &self.search {
            Some(search) => search.remaining(),
            None => &[],
        }
    }

    /// Examine every package in `packages`, in order.
    pub fn find<'p>(&mut self, packages: &'p [PkgInfo]) -> Vec<Finding<'p>> {
        let mut findings = Vec::new();
        for candidate in packages {
            if let Some(finding) = self.check(candidate, packages) {
                findings.push(finding);
            }
        }
        tracing::debug!(
            candidates = packages.len(),
            findings = findings.len(),
            "orphan scan finished"
        );
        findings
    }

    /// Examine one candidate against the whole package list.
    pub fn check<'p>(
        &mut self,
        candidate: &'p PkgInfo,
        packages: &'p [PkgInfo],
    ) -> Option<Finding<'p>> {
        if self.is_exempt(candidate) {
            return None;
        }

        if let Some(search) = self.search.as_mut()
            && !search.take(&candidate.package)
        {
            return None;
        }

        if self.options.show_deps {
            let dependents = dependents_of(candidate, packages);
            return Some(Finding::Dependents {
                package: candidate,
                dependents,
            });
        }

        if has_dependent(candidate, packages) {
            return None;
        }

        if self.options.exclude_dev && candidate.is_dev() {
            return None;
        }

        Some(Finding::Orphan(candidate))
    }

    fn is_exempt(&self, candidate: &PkgInfo) -> bool {
        let options = self.options;

        if options.find_config && !candidate.config {
            return true;
        }
        if candidate.hold {
            return true;
        }
        if candidate.priority < options.min_priority {
            return true;
        }
        if is_kept(self.keep, &candidate.package) {
            tracing::trace!(package = candidate.name(), "on keep list");
            return true;
        }
        !self.classifier.is_library(candidate)
    }
}

/// Whether any package has a relationship entry `candidate` satisfies.
fn has_dependent(candidate: &PkgInfo, packages: &[PkgInfo]) -> bool {
    packages
        .iter()
        .any(|pkg| pkg.deps.iter().any(|dep| candidate.satisfies(dep)))
}

/// Every package with a relationship entry `candidate` satisfies, once per
/// matching entry.
fn dependents_of<'p>(candidate: &PkgInfo, packages: &'p [PkgInfo]) -> Vec<&'p PkgInfo> {
    packages
        .iter()
        .flat_map(|pkg| {
            pkg.deps
                .iter()
                .filter(|dep| candidate.satisfies(dep))
                .map(move |_| pkg)
        })
        .collect()
}
