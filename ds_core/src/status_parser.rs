//! Parser for the dpkg status database.
//!
//! The status file is a sequence of stanzas separated by blank lines. Each
//! stanza is a list of `Field: value` lines; continuation lines start with
//! whitespace and are ignored here. Only the fields needed for orphan
//! detection are interpreted:
//!
//! ```text
//! Package: libfoo1
//! Status: install ok installed
//! Priority: optional
//! Section: libs
//! Installed-Size: 120
//! Architecture: amd64
//! Provides: libfoo-abi-1
//! Depends: libc6 (>= 2.34), zlib1g | libz1
//! Description: foo library
//!  Long description continuation.
//! ```
//!
//! Spaces are removed from a line before it is interpreted, so values are
//! matched in their compacted form (`Status:installokinstalled`).
//!
//! The parser does not try to validate the database. A non-continuation line
//! without a colon, or a `Status` line describing a half-finished dpkg
//! operation, is an error.

use regex::Regex;

use crate::dep::{Dep, strip_char};
use crate::errors::Error;
use crate::exclude::ExcludeList;
use crate::options::{Guess, Options};
use crate::package::PkgInfo;
use crate::priority::string_to_priority;

/// Fields of a stanza that the parser interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Package,
    Status,
    Essential,
    Priority,
    Section,
    Provides,
    Depends,
    PreDepends,
    Recommends,
    Suggests,
    InstalledSize,
    Description,
    Architecture,
}

impl Field {
    /// Look up a field by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        const FIELDS: [(&str, Field); 13] = [
            ("Package", Field::Package),
            ("Status", Field::Status),
            ("Essential", Field::Essential),
            ("Priority", Field::Priority),
            ("Section", Field::Section),
            ("Provides", Field::Provides),
            ("Depends", Field::Depends),
            ("Pre-Depends", Field::PreDepends),
            ("Recommends", Field::Recommends),
            ("Suggests", Field::Suggests),
            ("Installed-Size", Field::InstalledSize),
            ("Description", Field::Description),
            ("Architecture", Field::Architecture),
        ];

        FIELDS
            .iter()
            .find(|(field_name, _)| field_name.eq_ignore_ascii_case(name))
            .map(|(_, field)| *field)
    }
}

/// Result of parsing a whole status file.
#[derive(Debug, Clone, Default)]
pub struct StatusDb {
    /// Retained packages in file order.
    pub packages: Vec<PkgInfo>,
    /// More than one architecture other than `all` was seen.
    pub multiarch: bool,
}

struct StatusPatterns {
    installed: Regex,
    not_installed: Regex,
    hold: Regex,
    config_files: Regex,
    dummy: Regex,
    transitional: Regex,
}

impl StatusPatterns {
    fn new() -> Result<Self, Error> {
        Ok(Self {
            installed: compile(r"(?i)^Status:.*[^-]installed$")?,
            not_installed: compile(r"(?i)^Status:.*not-installed$")?,
            hold: compile(r"(?i)^Status:hold.*[^-]installed$")?,
            config_files: compile(r"(?i)^Status:.*config-files$")?,
            dummy: compile(r"(?i)^Description:.*dummy")?,
            transitional: compile(
                r"(?i)^Description:.*transition[sn]?($|ing|al|ary| ?package| ?purposes)",
            )?,
        })
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Line-oriented stanza parser.
///
/// Holds the state that spans stanzas: whether packages of more than one
/// architecture have been seen.
pub struct StatusParser<'a> {
    options: &'a Options,
    patterns: StatusPatterns,
    first_arch: Option<String>,
    multiarch: bool,
}

impl<'a> StatusParser<'a> {
    pub fn new(options: &'a Options) -> Result<Self, Error> {
        Ok(Self {
            options,
            patterns: StatusPatterns::new()?,
            first_arch: None,
            multiarch: false,
        })
    }

    pub fn multiarch(&self) -> bool {
        self.multiarch
    }

    /// Apply one non-continuation line of a stanza to `pkg`.
    pub fn parse_line(&mut self, raw: &str, pkg: &mut PkgInfo) -> Result<(), Error> {
        let line = strip_char(raw.trim_end_matches(['\r', '\n']), ' ');

        let Some((name, value)) = line.split_once(':') else {
            return Err(Error::InvalidStatusFile {
                line: raw.to_string(),
            });
        };
        let Some(field) = Field::from_name(name) else {
            return Ok(());
        };

        match field {
            Field::Package => {
                let arch = pkg.arch().map(str::to_string);
                pkg.package = Dep::with_arch(value, arch);
            }
            Field::Status => self.parse_status(raw, &line, pkg)?,
            Field::Essential => {
                if line == "Essential:yes" {
                    pkg.essential = true;
                }
            }
            Field::Priority => pkg.priority = string_to_priority(value),
            Field::Section => {
                pkg.section = Some(if value.contains('/') {
                    value.to_string()
                } else {
                    format!("main/{}", value)
                });
            }
            Field::Provides => {
                pkg.provides = value
                    .split(',')
                    .filter_map(|token| Dep::from_relation(strip_version(token)))
                    .collect();
            }
            Field::Depends | Field::PreDepends => add_relations(pkg, value),
            Field::Recommends => {
                if !self.options.ignore_recommends {
                    add_relations(pkg, value);
                }
            }
            Field::Suggests => {
                if !self.options.ignore_suggests {
                    add_relations(pkg, value);
                }
            }
            Field::InstalledSize => pkg.installed_size = parse_leading_int(value),
            Field::Description => {
                if self.options.guess.contains(Guess::Dummy)
                    && (self.patterns.dummy.is_match(&line)
                        || self.patterns.transitional.is_match(&line))
                {
                    pkg.dummy = true;
                }
            }
            Field::Architecture => {
                pkg.package.set_arch(Some(value.to_string()));
                self.track_arch(value);
            }
        }

        Ok(())
    }

    fn parse_status(&self, raw: &str, line: &str, pkg: &mut PkgInfo) -> Result<(), Error> {
        let patterns = &self.patterns;

        if patterns.installed.is_match(line) {
            pkg.install = true;
            if !self.options.force_hold && patterns.hold.is_match(line) {
                pkg.hold = true;
            }
        } else if patterns.config_files.is_match(line) {
            if self.options.find_config {
                pkg.config = true;
            }
        } else if !patterns.not_installed.is_match(line) {
            let status = raw
                .split_once(':')
                .map(|(_, v)| v.trim())
                .unwrap_or_default();
            return Err(Error::ImproperState {
                package: pkg.has_name().then(|| pkg.name().to_string()),
                status: status.to_string(),
            });
        }

        Ok(())
    }

    fn track_arch(&mut self, arch: &str) {
        if self.multiarch || arch == "all" {
            return;
        }
        match &self.first_arch {
            None => self.first_arch = Some(arch.to_string()),
            Some(first) if first != arch => {
                tracing::debug!(first = %first, other = %arch, "multiple architectures installed");
                self.multiarch = true;
                self.first_arch = None;
            }
            Some(_) => {}
        }
    }
}

/// Cut a version constraint such as `(>= 2.0)` off a relation token.
fn strip_version(token: &str) -> &str {
    token.split('(').next().unwrap_or_default()
}

/// Add every alternative of a relationship field to `pkg.deps`.
fn add_relations(pkg: &mut PkgInfo, value: &str) {
    for token in value.split([',', '|']) {
        if let Some(dep) = Dep::from_relation(strip_version(token)) {
            pkg.add_dep(dep);
        }
    }
}

/// Parse the leading base-10 integer of `value`; 0 when there is none.
fn parse_leading_int(value: &str) -> i64 {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Parse a whole status file.
///
/// Stanzas that are not installed are dropped, unless configuration-file
/// remnants are being searched for. Stanzas naming an excluded package are
/// dropped as well.
pub fn parse_status(
    content: &str,
    options: &Options,
    exclude: &ExcludeList,
) -> Result<StatusDb, Error> {
    let mut parser = StatusParser::new(options)?;
    let mut packages = Vec::new();
    let mut current = PkgInfo::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            finish_stanza(std::mem::take(&mut current), options, exclude, &mut packages);
            continue;
        }
        if line.starts_with([' ', '\t']) {
            continue;
        }
        parser.parse_line(line, &mut current)?;
    }
    finish_stanza(current, options, exclude, &mut packages);

    tracing::debug!(
        packages = packages.len(),
        multiarch = parser.multiarch(),
        "parsed status file"
    );

    Ok(StatusDb {
        packages,
        multiarch: parser.multiarch(),
    })
}

fn finish_stanza(
    pkg: PkgInfo,
    options: &Options,
    exclude: &ExcludeList,
    packages: &mut Vec<PkgInfo>,
) {
    if !pkg.has_name() {
        return;
    }
    if !pkg.install && !options.find_config {
        tracing::trace!(package = pkg.name(), "skipping package that is not installed");
        return;
    }
    if exclude.contains(&pkg.package) {
        tracing::debug!(package = pkg.name(), "excluded");
        return;
    }
    packages.push(pkg);
}
