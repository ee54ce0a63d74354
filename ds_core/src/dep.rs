//! Package name references and the cheap name hash used to compare them.
//!
//! A [`Dep`] names a package, optionally qualified by an architecture. Two
//! references are equal when their names are equal; the architecture never
//! takes part in identity. The precomputed [`name_hash`] lets most
//! comparisons fail on a single integer compare before touching the strings.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A reference to a package by name.
#[derive(Debug, Clone, Default, Eq)]
pub struct Dep {
    name: String,
    arch: Option<String>,
    hash: u32,
}

impl Dep {
    /// Create an unqualified reference.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let hash = name_hash(&name);
        Dep {
            name,
            arch: None,
            hash,
        }
    }

    /// Create a reference carrying an architecture qualifier.
    pub fn with_arch(name: impl Into<String>, arch: Option<String>) -> Self {
        let mut dep = Dep::new(name);
        dep.arch = arch;
        dep
    }

    /// Parse a relationship token such as `libc6:amd64`.
    ///
    /// The architecture qualifier is dropped: relationship fields only ever
    /// match by name. Returns `None` for an empty token.
    pub fn from_relation(token: &str) -> Option<Self> {
        let name = token.split(':').next().unwrap_or_default().trim();
        if name.is_empty() {
            return None;
        }
        Some(Dep::new(name))
    }

    /// Parse a user supplied `name[:arch]` argument, keeping the qualifier.
    pub fn from_qualified(arg: &str) -> Option<Self> {
        let (name, arch) = match arg.split_once(':') {
            Some((name, arch)) => (name, Some(arch.to_string())),
            None => (arg, None),
        };
        if name.is_empty() {
            return None;
        }
        Some(Dep::with_arch(name, arch.filter(|a| !a.is_empty())))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arch(&self) -> Option<&str> {
        self.arch.as_deref()
    }

    pub fn set_arch(&mut self, arch: Option<String>) {
        self.arch = arch;
    }

    pub fn namehash(&self) -> u32 {
        self.hash
    }

    /// Name plus `:arch` when an architecture is known and `with_arch` is set.
    pub fn display_name(&self, with_arch: bool) -> String {
        match (&self.arch, with_arch) {
            (Some(arch), true) => format!("{}:{}", self.name, arch),
            _ => self.name.clone(),
        }
    }
}

impl PartialEq for Dep {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.name == other.name
    }
}

impl Hash for Dep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name(true))
    }
}

/// Shift-xor hash over the bytes of a package name.
///
/// Not collision resistant; only used as an equality pre-check.
pub fn name_hash(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in name.bytes() {
        hash ^= u32::from(byte);
        hash <<= 1;
    }
    // The terminator round: xor with zero, shift once more.
    hash << 1
}

/// Remove every occurrence of `c` from `s`.
pub fn strip_char(s: &str, c: char) -> String {
    s.chars().filter(|&ch| ch != c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn equality_ignores_architecture() {
        let plain = Dep::new("libfoo");
        let qualified = Dep::with_arch("libfoo", Some("amd64".to_string()));
        assert_eq!(plain, qualified);
        assert_ne!(plain, Dep::new("libfoo2"));
    }

    #[test]
    fn relation_token_drops_arch_qualifier() {
        let dep = Dep::from_relation("libc6:any").unwrap();
        assert_eq!(dep.name(), "libc6");
        assert_eq!(dep.arch(), None);
        assert_eq!(dep.namehash(), name_hash("libc6"));
    }

    #[test]
    fn empty_relation_token_is_rejected() {
        assert!(Dep::from_relation("").is_none());
        assert!(Dep::from_relation(":amd64").is_none());
    }

    #[test]
    fn qualified_argument_keeps_arch() {
        let dep = Dep::from_qualified("libfoo:i386").unwrap();
        assert_eq!(dep.name(), "libfoo");
        assert_eq!(dep.arch(), Some("i386"));

        let dep = Dep::from_qualified("libbar").unwrap();
        assert_eq!(dep.arch(), None);
    }

    #[test]
    fn display_name_appends_arch_only_on_request() {
        let dep = Dep::with_arch("libfoo", Some("armhf".to_string()));
        assert_eq!(dep.display_name(true), "libfoo:armhf");
        assert_eq!(dep.display_name(false), "libfoo");
        assert_eq!(Dep::new("libbar").display_name(true), "libbar");
    }

    #[test]
    fn hash_of_known_names() {
        assert_eq!(name_hash(""), 0);
        // 'a' = 0x61: (0x61 << 1) << 1
        assert_eq!(name_hash("a"), 0x61 << 2);
    }

    #[test]
    fn strip_char_removes_all_occurrences() {
        assert_eq!(strip_char("Depends: a, b (>= 1)", ' '), "Depends:a,b(>=1)");
        assert_eq!(strip_char("nospace", ' '), "nospace");
    }

    proptest! {
        #[test]
        fn dep_equality_agrees_with_name_equality(
            a in "[a-z0-9.+-]{1,12}",
            b in "[a-z0-9.+-]{1,12}",
        ) {
            prop_assert_eq!(Dep::new(a.clone()) == Dep::new(b.clone()), a == b);
        }
    }
}
