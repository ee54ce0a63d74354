//! Output formatting for orphan listings and dependent trees.
//!
//! Everything here returns plain strings so the layout can be tested
//! without capturing stdout.

use ds_core::{Finding, Options, PkgInfo, priority_to_string};

/// Column at which the priority starts in the orphan listing.
const PRIORITY_COLUMN: usize = 24;
/// Extra room for a `:arch` suffix.
const ARCH_SUFFIX_WIDTH: usize = 6;

/// Shown for packages without a `Section` field.
const NO_SECTION: &str = "-";

/// Output switches that affect layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    pub show_section: bool,
    pub show_priority: bool,
    pub show_size: bool,
    pub arch_suffix: bool,
}

impl Layout {
    pub fn new(options: &Options, multiarch: bool) -> Self {
        Self {
            show_section: options.show_section,
            show_priority: options.show_priority,
            show_size: options.show_size,
            arch_suffix: options.show_arch.print_suffix(multiarch),
        }
    }
}

fn section(pkg: &PkgInfo) -> &str {
    pkg.section.as_deref().unwrap_or(NO_SECTION)
}

// ============================================================================
// Formatting helpers (pure functions for testability)
// ============================================================================

/// One line of the default orphan listing.
pub fn format_orphan_line(pkg: &PkgInfo, layout: Layout) -> String {
    let mut line = String::new();

    if layout.show_size {
        line.push_str(&format!("{:>10} ", pkg.installed_size));
    }
    if layout.show_section {
        line.push_str(&format!("{:<25} ", section(pkg)));
    }

    let name = pkg.display_name(layout.arch_suffix);
    if layout.show_priority {
        let width = if layout.arch_suffix {
            PRIORITY_COLUMN + ARCH_SUFFIX_WIDTH
        } else {
            PRIORITY_COLUMN
        };
        line.push_str(&format!(
            "{:<width$} {}",
            name,
            priority_to_string(pkg.priority)
        ));
    } else {
        line.push_str(&name);
    }

    line
}

/// Header line for a package whose dependents are listed below it.
pub fn format_deps_header(pkg: &PkgInfo, layout: Layout) -> String {
    let mut line = pkg.display_name(layout.arch_suffix);

    if layout.show_section {
        line.push_str(&format!(" ({}", section(pkg)));
    }
    if layout.show_priority {
        line.push_str(&format!(" - {}", priority_to_string(pkg.priority)));
    }
    if layout.show_size {
        line.push_str(&format!(", {}", pkg.installed_size));
    }
    if layout.show_section {
        line.push(')');
    }

    line
}

/// Indented line naming one dependent package.
pub fn format_dependent_line(pkg: &PkgInfo, layout: Layout) -> String {
    format!("      {}", pkg.display_name(layout.arch_suffix))
}

/// All output lines for one finding.
pub fn format_finding(finding: &Finding<'_>, layout: Layout) -> Vec<String> {
    match finding {
        Finding::Orphan(pkg) => vec![format_orphan_line(pkg, layout)],
        Finding::Dependents {
            package,
            dependents,
        } => std::iter::once(format_deps_header(package, layout))
            .chain(dependents.iter().map(|d| format_dependent_line(d, layout)))
            .collect(),
    }
}

// ============================================================================
// Printing
// ============================================================================

pub fn print_findings(findings: &[Finding<'_>], layout: Layout) {
    for finding in findings {
        for line in format_finding(finding, layout) {
            println!("{}", line);
        }
    }
}
