//! Turning parsed arguments into [`Options`].

use std::io::{self, BufRead};

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use ds_core::{DEFAULT_PRIORITY, Error, GuessSet, Options, ShowArch, string_to_priority};

use crate::Cli;

/// Most package names accepted on the command line.
pub const MAX_PACKAGE_ARGS: usize = 50;

/// A `--guess-X` switch, its hidden `--no-guess-X` twin and the categories
/// both cover.
struct GuessSwitch {
    on: &'static str,
    off: &'static str,
    help: &'static str,
    set: GuessSet,
}

const GUESS_SWITCHES: [GuessSwitch; 16] = [
    GuessSwitch {
        on: "guess-common",
        off: "no-guess-common",
        help: "Guess that -common packages are libraries",
        set: GuessSet::COMMON,
    },
    GuessSwitch {
        on: "guess-data",
        off: "no-guess-data",
        help: "Guess that -data and -music packages are libraries",
        set: GuessSet::DATA,
    },
    GuessSwitch {
        on: "guess-debug",
        off: "no-guess-debug",
        help: "Guess that -dbg and -dbgsym packages are libraries",
        set: GuessSet::DEBUG,
    },
    GuessSwitch {
        on: "guess-dev",
        off: "no-guess-dev",
        help: "Guess that -dev packages are libraries",
        set: GuessSet::DEV,
    },
    GuessSwitch {
        on: "guess-doc",
        off: "no-guess-doc",
        help: "Guess that -doc packages are libraries",
        set: GuessSet::DOC,
    },
    GuessSwitch {
        on: "guess-dummy",
        off: "no-guess-dummy",
        help: "Guess that dummy and transitional packages are libraries",
        set: GuessSet::DUMMY,
    },
    GuessSwitch {
        on: "guess-interpreters",
        off: "no-guess-interpreters",
        help: "Same as --guess-{java,mono,perl,pike,python,ruby}",
        set: GuessSet::INTERPRETERS,
    },
    GuessSwitch {
        on: "guess-java",
        off: "no-guess-java",
        help: "Guess that lib*-java packages are libraries",
        set: GuessSet::JAVA,
    },
    GuessSwitch {
        on: "guess-kernel",
        off: "no-guess-kernel",
        help: "Guess that kernel module packages are libraries",
        set: GuessSet::KERNEL,
    },
    GuessSwitch {
        on: "guess-mono",
        off: "no-guess-mono",
        help: "Guess that libmono packages are libraries",
        set: GuessSet::MONO,
    },
    GuessSwitch {
        on: "guess-perl",
        off: "no-guess-perl",
        help: "Guess that lib*-perl packages are libraries",
        set: GuessSet::PERL,
    },
    GuessSwitch {
        on: "guess-pike",
        off: "no-guess-pike",
        help: "Guess that pike* packages are libraries",
        set: GuessSet::PIKE,
    },
    GuessSwitch {
        on: "guess-python",
        off: "no-guess-python",
        help: "Guess that python* packages are libraries",
        set: GuessSet::PYTHON,
    },
    GuessSwitch {
        on: "guess-ruby",
        off: "no-guess-ruby",
        help: "Guess that lib*-ruby packages are libraries",
        set: GuessSet::RUBY,
    },
    GuessSwitch {
        on: "guess-section",
        off: "no-guess-section",
        help: "Guess that lib* packages outside the library sections are libraries",
        set: GuessSet::SECTION,
    },
    GuessSwitch {
        on: "guess-all",
        off: "no-guess-all",
        help: "Enable every guess",
        set: GuessSet::ALL,
    },
];

/// Register the `--guess-*` and `--no-guess-*` switches on `cmd`.
///
/// They are applied in command-line order, so `--guess-all --no-guess-dev`
/// enables everything but dev while the reverse enables everything. Only
/// their positions matter, so [`guess_set`] reads them from the matches.
pub fn with_guess_switches(cmd: Command) -> Command {
    GUESS_SWITCHES.iter().fold(cmd, |cmd, switch| {
        cmd.arg(
            Arg::new(switch.on)
                .long(switch.on)
                .action(ArgAction::Count)
                .help(switch.help),
        )
        .arg(
            Arg::new(switch.off)
                .long(switch.off)
                .action(ArgAction::Count)
                .hide(true),
        )
    })
}

/// Command-line positions of every occurrence of the flag `id`.
fn occurrences(matches: &ArgMatches, id: &str) -> Vec<usize> {
    if matches.value_source(id) != Some(ValueSource::CommandLine) {
        return Vec::new();
    }
    matches
        .indices_of(id)
        .map(|indices| indices.collect())
        .unwrap_or_default()
}

/// Fold the guess switches into a set, honouring their order.
pub fn guess_set(matches: &ArgMatches) -> GuessSet {
    let mut events: Vec<(usize, GuessSet, bool)> = Vec::new();
    for switch in &GUESS_SWITCHES {
        for index in occurrences(matches, switch.on) {
            events.push((index, switch.set, true));
        }
        for index in occurrences(matches, switch.off) {
            events.push((index, switch.set, false));
        }
    }
    events.sort_by_key(|(index, _, _)| *index);

    events
        .into_iter()
        .fold(GuessSet::NONE, |acc, (_, set, enable)| {
            if enable {
                acc.union(set)
            } else {
                acc.difference(set)
            }
        })
}

/// Parse a `--priority` value: a priority name or a number.
pub fn parse_priority(value: &str) -> Result<i32, Error> {
    match string_to_priority(value) {
        0 => value.trim().parse::<i32>().map_err(|_| Error::InvalidPriority {
            value: value.to_string(),
        }),
        level => Ok(level),
    }
}

/// Build the run configuration from the parsed command line.
///
/// Search mode adjustments that depend on positional arguments are left to
/// the caller.
pub fn derive_options(cli: &Cli, matches: &ArgMatches) -> Result<Options, Error> {
    let min_priority = match cli.priority.as_deref() {
        Some(value) => parse_priority(value)?,
        None => DEFAULT_PRIORITY,
    };

    let section_count = i32::from(cli.show_section) + i32::from(cli.all_packages)
        - i32::from(cli.no_show_section);

    let show_arch = if cli.show_arch {
        ShowArch::Always
    } else if cli.no_show_arch {
        ShowArch::Never
    } else {
        ShowArch::Default
    };

    let options = Options {
        show_deps: cli.show_deps,
        ignore_recommends: cli.ignore_recommends || cli.nice_mode,
        ignore_suggests: cli.ignore_suggests || cli.nice_mode,
        all_packages: cli.all_packages > 0 || cli.find_config,
        min_priority,
        show_section: section_count > 0,
        show_priority: cli.show_priority,
        show_size: cli.show_size,
        show_arch,
        force_hold: cli.force_hold,
        find_config: cli.find_config,
        search_libdevel: cli.libdevel,
        guess: guess_set(matches),
        guess_only: cli.guess_only,
        exclude_dev: cli.exclude_dev,
    };

    tracing::debug!(?options, "derived options");
    Ok(options)
}

/// Expand package name arguments; a lone `-` reads one name per line from
/// standard input.
pub fn read_names(args: &[String]) -> Result<Vec<String>, Error> {
    let stdin = io::stdin();
    read_names_from(args, stdin.lock())
}

pub fn read_names_from(args: &[String], mut input: impl BufRead) -> Result<Vec<String>, Error> {
    let mut names = Vec::new();

    for arg in args {
        if arg != "-" {
            names.push(arg.clone());
            continue;
        }

        let mut line = String::new();
        loop {
            line.clear();
            let read = input
                .read_line(&mut line)
                .map_err(|e| Error::io("<stdin>", &e))?;
            if read == 0 {
                break;
            }
            let name: String = line
                .chars()
                .filter(|c| !matches!(c, ' ' | '\r' | '\n'))
                .collect();
            if !name.is_empty() {
                names.push(name);
            }
        }
    }

    Ok(names)
}
