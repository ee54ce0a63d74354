//! Run configuration shared by the parser, classifier and orphan engine.
//!
//! Built once from command-line arguments and passed around by reference.

/// Default minimum priority of packages that are examined.
pub const DEFAULT_PRIORITY: i32 = 2;

/// Guess categories, listed in the order `--print-guess-list` shows them.
pub const GUESS_CATEGORIES: [&str; 15] = [
    "common",
    "data",
    "debug",
    "dev",
    "doc",
    "dummy",
    "interpreters",
    "java",
    "kernel",
    "mono",
    "perl",
    "pike",
    "python",
    "ruby",
    "section",
];

/// One heuristic for spotting library-like packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    Dev,
    Perl,
    Section,
    Debug,
    Pike,
    Python,
    Ruby,
    Dummy,
    Common,
    Data,
    Doc,
    Mono,
    Kernel,
    Java,
}

impl Guess {
    pub const ALL: [Guess; 14] = [
        Guess::Dev,
        Guess::Perl,
        Guess::Section,
        Guess::Debug,
        Guess::Pike,
        Guess::Python,
        Guess::Ruby,
        Guess::Dummy,
        Guess::Common,
        Guess::Data,
        Guess::Doc,
        Guess::Mono,
        Guess::Kernel,
        Guess::Java,
    ];

    /// Categories matched against the package name.
    pub const NAME_BASED: [Guess; 12] = [
        Guess::Perl,
        Guess::Python,
        Guess::Pike,
        Guess::Ruby,
        Guess::Mono,
        Guess::Dev,
        Guess::Debug,
        Guess::Common,
        Guess::Data,
        Guess::Doc,
        Guess::Kernel,
        Guess::Java,
    ];

    const fn bit(self) -> u32 {
        match self {
            Guess::Dev => 1 << 1,
            Guess::Perl => 1 << 2,
            Guess::Section => 1 << 3,
            Guess::Debug => 1 << 4,
            Guess::Pike => 1 << 5,
            Guess::Python => 1 << 6,
            Guess::Ruby => 1 << 7,
            Guess::Dummy => 1 << 8,
            Guess::Common => 1 << 9,
            Guess::Data => 1 << 10,
            Guess::Doc => 1 << 11,
            Guess::Mono => 1 << 12,
            Guess::Kernel => 1 << 13,
            Guess::Java => 1 << 14,
        }
    }
}

/// A set of enabled guess categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuessSet(u32);

impl GuessSet {
    pub const NONE: GuessSet = GuessSet(0);
    pub const ALL: GuessSet = GuessSet(u32::MAX);
    pub const COMMON: GuessSet = GuessSet(Guess::Common.bit());
    pub const DATA: GuessSet = GuessSet(Guess::Data.bit());
    pub const DEBUG: GuessSet = GuessSet(Guess::Debug.bit());
    pub const DEV: GuessSet = GuessSet(Guess::Dev.bit());
    pub const DOC: GuessSet = GuessSet(Guess::Doc.bit());
    pub const DUMMY: GuessSet = GuessSet(Guess::Dummy.bit());
    pub const JAVA: GuessSet = GuessSet(Guess::Java.bit());
    pub const KERNEL: GuessSet = GuessSet(Guess::Kernel.bit());
    pub const MONO: GuessSet = GuessSet(Guess::Mono.bit());
    pub const PERL: GuessSet = GuessSet(Guess::Perl.bit());
    pub const PIKE: GuessSet = GuessSet(Guess::Pike.bit());
    pub const PYTHON: GuessSet = GuessSet(Guess::Python.bit());
    pub const RUBY: GuessSet = GuessSet(Guess::Ruby.bit());
    pub const SECTION: GuessSet = GuessSet(Guess::Section.bit());
    pub const INTERPRETERS: GuessSet = GuessSet(
        Guess::Perl.bit()
            | Guess::Pike.bit()
            | Guess::Python.bit()
            | Guess::Ruby.bit()
            | Guess::Mono.bit()
            | Guess::Java.bit(),
    );

    pub fn only(guess: Guess) -> Self {
        GuessSet(guess.bit())
    }

    pub fn of(guesses: &[Guess]) -> Self {
        guesses
            .iter()
            .fold(GuessSet::NONE, |set, g| set.union(GuessSet::only(*g)))
    }

    pub fn union(self, other: GuessSet) -> Self {
        GuessSet(self.0 | other.0)
    }

    pub fn difference(self, other: GuessSet) -> Self {
        GuessSet(self.0 & !other.0)
    }

    pub fn contains(self, guess: Guess) -> bool {
        self.0 & guess.bit() == guess.bit()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when `guess` is the one and only enabled category.
    pub fn is_only(self, guess: Guess) -> bool {
        self.0 == guess.bit()
    }

    /// Whether any category other than `Section` and `Dummy` is enabled.
    pub fn has_name_based(self) -> bool {
        Guess::NAME_BASED.iter().any(|g| self.contains(*g))
    }
}

/// When to print `:arch` suffixes after package names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowArch {
    /// Only when the status file lists packages of several architectures.
    #[default]
    Default,
    Always,
    Never,
}

impl ShowArch {
    pub fn print_suffix(self, multiarch: bool) -> bool {
        match self {
            ShowArch::Always => true,
            ShowArch::Never => false,
            ShowArch::Default => multiarch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Print every package that depends on a candidate instead of orphans.
    pub show_deps: bool,
    pub ignore_recommends: bool,
    pub ignore_suggests: bool,
    /// Treat every package as a library.
    pub all_packages: bool,
    /// Minimum priority level a candidate must have; 0 disables the filter.
    pub min_priority: i32,
    pub show_section: bool,
    pub show_priority: bool,
    pub show_size: bool,
    pub show_arch: ShowArch,
    /// Ignore hold flags in the status file.
    pub force_hold: bool,
    /// Report packages of which only configuration files remain.
    pub find_config: bool,
    /// Also treat the `libdevel` section as a library section.
    pub search_libdevel: bool,
    pub guess: GuessSet,
    /// Skip the section test and rely on guessing alone.
    pub guess_only: bool,
    /// Hide `-dev` and `-dbg` packages from the orphan listing.
    pub exclude_dev: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            show_deps: false,
            ignore_recommends: false,
            ignore_suggests: false,
            all_packages: false,
            min_priority: DEFAULT_PRIORITY,
            show_section: false,
            show_priority: false,
            show_size: false,
            show_arch: ShowArch::Default,
            force_hold: false,
            find_config: false,
            search_libdevel: false,
            guess: GuessSet::NONE,
            guess_only: false,
            exclude_dev: false,
        }
    }
}
