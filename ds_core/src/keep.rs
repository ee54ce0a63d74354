//! Keep list contents: packages that are never reported.
//!
//! A keep file holds one package name per line. Leading blanks are ignored,
//! and the name ends at the first blank, `:` or `#`, so `libfoo1:amd64 # why`
//! keeps `libfoo1`. Blank lines are skipped.
//!
//! Everything here works on text already in memory; reading and writing the
//! file lives in `ds_io`.

use crate::dep::Dep;

const NAME_TERMINATORS: [char; 6] = [' ', '\t', '\r', '\n', ':', '#'];

/// The package name a keep file line refers to, if any.
pub fn keep_entry_name(line: &str) -> Option<&str> {
    let line = line.trim_start_matches([' ', '\t']);
    let end = line.find(NAME_TERMINATORS).unwrap_or(line.len());
    let name = &line[..end];
    (!name.is_empty()).then_some(name)
}

/// Parse keep file content into entries, in file order.
pub fn parse_keep_list(content: &str) -> Vec<Dep> {
    content
        .split('\n')
        .filter_map(keep_entry_name)
        .map(Dep::new)
        .collect()
}

/// Union of two keep lists.
///
/// Entries of `a` are kept as they are; entries of `b` are appended when no
/// equal entry is already present.
pub fn merge_keep_lists(a: Vec<Dep>, b: &[Dep]) -> Vec<Dep> {
    let mut merged = a;
    for dep in b {
        if !merged.contains(dep) {
            merged.push(dep.clone());
        }
    }
    merged
}

/// Whether `dep` is on the keep list. Architecture is not considered.
pub fn is_kept(keep: &[Dep], dep: &Dep) -> bool {
    keep.iter().any(|k| k == dep)
}

/// First of `names` that is already on the keep list.
pub fn find_duplicate<'a>(keep: &[Dep], names: &'a [Dep]) -> Option<&'a Dep> {
    names.iter().find(|name| is_kept(keep, name))
}

/// Text to append to a keep file currently holding `existing` so that every
/// name in `names` ends up on its own line.
///
/// A missing final newline in `existing` is repaired first.
pub fn append_entries(existing: &str, names: &[Dep]) -> String {
    let mut out = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        out.push('\n');
    }
    for name in names {
        out.push_str(name.name());
        out.push('\n');
    }
    out
}

/// Drop every line whose entry name is exactly one of `names`.
///
/// Returns the new content and the number of lines removed. All other lines,
/// comments and blank lines included, are copied unchanged.
pub fn remove_entries(content: &str, names: &[Dep]) -> (String, usize) {
    let mut kept = String::with_capacity(content.len());
    let mut removed = 0;

    for line in content.split_inclusive('\n') {
        let matches = keep_entry_name(line)
            .is_some_and(|entry| names.iter().any(|name| name.name() == entry));
        if matches {
            removed += 1;
        } else {
            kept.push_str(line);
        }
    }

    tracing::debug!(removed, "removed keep entries");
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn deps(names: &[&str]) -> Vec<Dep> {
        names.iter().map(|n| Dep::new(*n)).collect()
    }

    fn names(list: &[Dep]) -> Vec<&str> {
        list.iter().map(Dep::name).collect()
    }

    #[test]
    fn entry_name_stops_at_terminators() {
        assert_eq!(keep_entry_name("libfoo1"), Some("libfoo1"));
        assert_eq!(keep_entry_name("  libfoo1:amd64"), Some("libfoo1"));
        assert_eq!(keep_entry_name("\tlibbar # needed by scripts"), Some("libbar"));
        assert_eq!(keep_entry_name("libbaz\r"), Some("libbaz"));
        assert_eq!(keep_entry_name("libqux#comment"), Some("libqux"));
        assert_eq!(keep_entry_name(""), None);
        assert_eq!(keep_entry_name("   "), None);
        assert_eq!(keep_entry_name("# only a comment"), None);
    }

    #[test]
    fn parse_skips_blank_lines() {
        let list = parse_keep_list("libfoo1\n\n  libbar:i386\n\nlibbaz");
        assert_eq!(names(&list), vec!["libfoo1", "libbar", "libbaz"]);
        assert!(list.iter().all(|d| d.arch().is_none()));
    }

    #[test]
    fn merge_keeps_order_and_drops_duplicates() {
        let merged = merge_keep_lists(deps(&["x", "y"]), &deps(&["y", "z"]));
        assert_eq!(names(&merged), vec!["x", "y", "z"]);
    }

    #[test]
    fn merge_with_empty_sides() {
        assert_eq!(names(&merge_keep_lists(Vec::new(), &deps(&["a"]))), vec!["a"]);
        assert_eq!(names(&merge_keep_lists(deps(&["a"]), &[])), vec!["a"]);
    }

    #[test]
    fn keep_lookup_ignores_architecture() {
        let keep = deps(&["libfoo"]);
        let candidate = Dep::with_arch("libfoo", Some("amd64".to_string()));
        assert!(is_kept(&keep, &candidate));
        assert!(!is_kept(&keep, &Dep::new("libfoo2")));
    }

    #[test]
    fn duplicate_detection() {
        let keep = deps(&["libfoo", "libbar"]);
        let request = deps(&["libnew", "libbar"]);
        assert_eq!(find_duplicate(&keep, &request).map(Dep::name), Some("libbar"));
        assert!(find_duplicate(&keep, &deps(&["libnew"])).is_none());
    }

    #[test]
    fn append_repairs_missing_newline() {
        assert_eq!(append_entries("", &deps(&["a"])), "a\n");
        assert_eq!(append_entries("x\n", &deps(&["a", "b"])), "a\nb\n");
        assert_eq!(append_entries("x", &deps(&["a"])), "\na\n");
    }

    #[test]
    fn remove_matches_whole_names_only() {
        let content = "libfoo\nlibfoo1:amd64\n# libfoo\n  libfoo # note\nlibbar\n";
        let (out, removed) = remove_entries(content, &deps(&["libfoo"]));
        assert_eq!(removed, 2);
        assert_eq!(out, "libfoo1:amd64\n# libfoo\nlibbar\n");
    }

    #[test]
    fn remove_nothing() {
        let content = "libfoo\n";
        let (out, removed) = remove_entries(content, &deps(&["libbar"]));
        assert_eq!(removed, 0);
        assert_eq!(out, content);
    }

    #[test]
    fn remove_last_line_without_newline() {
        let (out, removed) = remove_entries("libfoo\nlibbar", &deps(&["libbar"]));
        assert_eq!(removed, 1);
        assert_eq!(out, "libfoo\n");
    }

    proptest! {
        #[test]
        fn merge_has_no_duplicates_and_covers_both(
            a in proptest::collection::vec("[a-e]{1,2}", 0..10),
            b in proptest::collection::vec("[a-e]{1,2}", 0..10),
        ) {
            let mut a_unique: Vec<String> = Vec::new();
            for name in &a {
                if !a_unique.contains(name) {
                    a_unique.push(name.clone());
                }
            }
            let a_deps: Vec<Dep> = a_unique.iter().map(Dep::new).collect();
            let b_deps: Vec<Dep> = b.iter().map(Dep::new).collect();

            let merged = merge_keep_lists(a_deps.clone(), &b_deps);

            prop_assert_eq!(&merged[..a_deps.len()], &a_deps[..]);
            for (i, x) in merged.iter().enumerate() {
                prop_assert!(!merged[i + 1..].contains(x));
            }
            for name in a.iter().chain(b.iter()) {
                prop_assert!(merged.iter().any(|d| d.name() == name));
            }
        }

        #[test]
        fn appended_entries_parse_back(
            existing in "[a-z\n]{0,20}",
            added in proptest::collection::vec("[a-z][a-z0-9]{0,8}", 1..5),
        ) {
            let added_deps: Vec<Dep> = added.iter().map(Dep::new).collect();
            let content = format!("{}{}", existing, append_entries(&existing, &added_deps));
            let parsed = parse_keep_list(&content);
            for dep in &added_deps {
                prop_assert!(is_kept(&parsed, dep));
            }
        }
    }
}
