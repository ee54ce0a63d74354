//! Decides whether a package is library-like enough to be examined.
//!
//! The canonical test is section membership (`libs`, `oldlibs`,
//! `introspection`, optionally `libdevel`). Guess categories widen the net
//! with name and description heuristics.

use regex::Regex;

use crate::errors::Error;
use crate::options::{Guess, Options};
use crate::package::PkgInfo;
use crate::status_parser::compile;

/// Name pattern for each name-based guess category.
fn name_pattern(guess: Guess) -> Option<&'static str> {
    let pattern = match guess {
        Guess::Perl => r"^lib.*-perl$",
        Guess::Python => r"^python[[:digit:].]*-",
        Guess::Pike => r"^pike[[:digit:].]*-",
        Guess::Ruby => r"^lib.*-ruby[[:digit:].]*$",
        Guess::Mono => r"^libmono",
        Guess::Dev => r"-dev$",
        Guess::Debug => r"-dbg(sym)?$",
        Guess::Common => r"-common$",
        Guess::Data => r"-(data|music)$",
        Guess::Doc => r"-doc$",
        Guess::Kernel => r"(-modules|^nvidia-kernel)-.*[[:digit:]]+\.[[:digit:]]+\.[[:digit:]]+",
        Guess::Java => r"^lib.*-java$",
        Guess::Section | Guess::Dummy => return None,
    };
    Some(pattern)
}

/// `lib*` names that are usually not libraries.
const NOT_A_LIBRARY: &str = r"(-perl|-dev|-doc|-dbg)$|^lib(mono|pam|recad|reoffice)|-(ruby[[:digit:].]*|bin|tools|utils|dbg|dbgsym)$";

const LIBRARY_SECTIONS: [&str; 3] = ["/libs", "/oldlibs", "/introspection"];

/// Library classifier with its patterns compiled once per run.
pub struct Classifier<'a> {
    options: &'a Options,
    /// One matcher per enabled name-based category.
    name_matchers: Vec<Regex>,
    not_a_library: Regex,
}

impl<'a> Classifier<'a> {
    pub fn new(options: &'a Options) -> Result<Self, Error> {
        let name_matchers = Guess::NAME_BASED
            .iter()
            .filter(|g| options.guess.contains(**g))
            .filter_map(|g| name_pattern(*g))
            .map(compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            options,
            name_matchers,
            not_a_library: compile(NOT_A_LIBRARY)?,
        })
    }

    /// Whether `pkg` should be checked for reverse dependencies at all.
    pub fn is_library(&self, pkg: &PkgInfo) -> bool {
        let options = self.options;
        let guess = options.guess;
        let name = pkg.name();

        if options.all_packages {
            return true;
        }

        let Some(section) = pkg.section.as_deref() else {
            return false;
        };

        if pkg.essential {
            return false;
        }

        // Mono packages put non-library content into libs.
        if name.starts_with("libmono") && !guess.contains(Guess::Mono) {
            return false;
        }

        if !options.guess_only && self.in_library_section(section) {
            return true;
        }

        if guess.is_empty() {
            return false;
        }

        if guess.contains(Guess::Dummy) && pkg.dummy {
            return true;
        }

        if guess.is_only(Guess::Dummy) {
            return false;
        }

        if guess.has_name_based() && self.name_matchers.iter().any(|re| re.is_match(name)) {
            return true;
        }

        if !guess.contains(Guess::Section) {
            return false;
        }

        name.starts_with("lib") && !self.not_a_library.is_match(name)
    }

    fn in_library_section(&self, section: &str) -> bool {
        LIBRARY_SECTIONS.iter().any(|s| section.ends_with(s))
            || (self.options.search_libdevel && section.ends_with("/libdevel"))
    }
}
