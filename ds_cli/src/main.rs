//! debsweep - find orphaned library packages in the dpkg database.

use clap::{Arg, ArgAction, Command, CommandFactory, FromArgMatches, Parser};
use console::style;
use std::path::{Path, PathBuf};

use ds_core::{Dep, Error};
use ds_io::{DEFAULT_KEEP_FILE, DEFAULT_STATUS_FILE};

mod args;
mod commands;
mod display;

use args::{MAX_PACKAGE_ARGS, derive_options, read_names};

#[derive(Parser, Debug)]
#[command(name = "debsweep")]
#[command(about = "Find packages that nothing depends on anymore")]
#[command(version, disable_version_flag = true, args_override_self = true)]
struct Cli {
    /// Package names to look up instead of listing orphans
    /// ('-' reads names from standard input)
    packages: Vec<String>,

    /// Read the package database from FILE
    #[arg(short = 'f', long, value_name = "FILE", default_value = DEFAULT_STATUS_FILE)]
    status_file: PathBuf,

    /// Use FILE as the keep list
    #[arg(short = 'k', long, value_name = "FILE", default_value = DEFAULT_KEEP_FILE)]
    keep_file: PathBuf,

    /// Show the packages depending on each candidate
    #[arg(short = 'd', long)]
    show_deps: bool,

    /// Show the priority of each package
    #[arg(short = 'P', long)]
    show_priority: bool,

    /// Show the section of each package
    #[arg(short = 's', long, action = ArgAction::Count)]
    show_section: u8,

    /// Do not show sections
    #[arg(long, action = ArgAction::Count)]
    no_show_section: u8,

    /// Show the installed size of each package
    #[arg(short = 'z', long)]
    show_size: bool,

    /// Always append the architecture to package names
    #[arg(long, overrides_with = "no_show_arch")]
    show_arch: bool,

    /// Never append the architecture to package names
    #[arg(long, overrides_with = "show_arch")]
    no_show_arch: bool,

    /// Examine all packages, not only libraries
    #[arg(short = 'a', long, action = ArgAction::Count)]
    all_packages: u8,

    /// Ignore the comma separated packages
    #[arg(short = 'e', long, value_name = "LIST")]
    exclude: Vec<String>,

    /// Do not report -dev and -dbg packages
    #[arg(short = 'D', long)]
    exclude_dev: bool,

    /// Ignore hold flags
    #[arg(short = 'H', long)]
    force_hold: bool,

    /// Do not count Recommends as dependencies
    #[arg(long)]
    ignore_recommends: bool,

    /// Do not count Suggests as dependencies
    #[arg(long)]
    ignore_suggests: bool,

    /// Same as --ignore-recommends --ignore-suggests
    #[arg(short = 'n', long)]
    nice_mode: bool,

    /// Minimum priority to examine (name or number 0-5)
    #[arg(short = 'p', long, value_name = "PRIOR")]
    priority: Option<String>,

    /// Report packages of which only configuration files remain
    #[arg(long)]
    find_config: bool,

    /// Treat the libdevel section as a library section
    #[arg(long)]
    libdevel: bool,

    /// Only use the --guess options, skip the section check
    #[arg(long)]
    guess_only: bool,

    /// Add the named packages to the keep list
    #[arg(short = 'A', long)]
    add_keep: bool,

    /// Remove the named packages from the keep list
    #[arg(short = 'R', long)]
    del_keep: bool,

    /// List the keep file
    #[arg(short = 'L', long)]
    list_keep: bool,

    /// Empty the keep file
    #[arg(short = 'Z', long)]
    zero_keep: bool,

    /// Also keep packages from debfoster's keepers file
    #[arg(long, overrides_with = "no_df_keep")]
    df_keep: bool,

    /// Ignore debfoster's keepers file
    #[arg(long, overrides_with = "df_keep")]
    no_df_keep: bool,

    /// List the available guess categories
    #[arg(long)]
    print_guess_list: bool,

    /// Check the options and exit
    #[arg(long)]
    check_options: bool,
}

/// The full command line, including the guess switches and `-v`.
fn command() -> Command {
    let cmd = Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print version"),
    );
    args::with_guess_switches(cmd)
}

fn program_name() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| "debsweep".to_string())
}

fn main() {
    init_tracing();

    let matches = match command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) if e.use_stderr() => {
            eprint!("{}", e);
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    match run(cli, &matches) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {} {}", program_name(), style("error:").red().bold(), e);
            if e.is_usage() {
                eprintln!("Usage: debsweep [OPTIONS] [PACKAGE]...");
                eprintln!("Try 'debsweep --help' for more information.");
            }
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("DEBSWEEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the command described by `cli`; returns the exit status.
fn run(cli: Cli, matches: &clap::ArgMatches) -> Result<i32, Error> {
    if cli.print_guess_list {
        for category in ds_core::GUESS_CATEGORIES {
            println!("{}", category);
        }
        return Ok(0);
    }

    let mut options = derive_options(&cli, matches)?;

    if cli.check_options {
        return Ok(0);
    }

    if cli.zero_keep {
        commands::keep::run_zero_keep(&cli.keep_file)?;
        if !cli.add_keep {
            return Ok(0);
        }
    }

    if cli.list_keep {
        commands::keep::run_list_keep(&cli.keep_file)?;
        return Ok(0);
    }

    if cli.guess_only && options.guess.is_empty() {
        return Err(Error::Usage {
            message: "need at least one other --guess option.".to_string(),
        });
    }

    if cli.packages.len() > MAX_PACKAGE_ARGS {
        return Err(Error::TooManyArguments {
            count: cli.packages.len(),
            max: MAX_PACKAGE_ARGS,
        });
    }

    let searching = !cli.packages.is_empty();
    if searching {
        options.all_packages = true;
        options.show_deps = true;
        options.min_priority = 0;
    }
    if options.show_deps {
        options.force_hold = true;
    }

    if cli.add_keep || cli.del_keep {
        let flag = if cli.add_keep { "--add-keep" } else { "--del-keep" };
        if !searching {
            return Err(Error::Usage {
                message: format!("not enough arguments for {}.", flag),
            });
        }

        let names: Vec<Dep> = read_names(&cli.packages)?
            .iter()
            .filter_map(|name| Dep::from_relation(name))
            .collect();

        if cli.del_keep {
            commands::keep::run_del_keep(&cli.keep_file, &names)?;
        } else {
            commands::keep::run_add_keep(&cli.keep_file, &cli.status_file, &names)?;
        }
        return Ok(0);
    }

    // Names from stdin may come up empty; search mode then matches nothing.
    let targets: Option<Vec<Dep>> = if searching {
        Some(
            read_names(&cli.packages)?
                .iter()
                .filter_map(|name| Dep::from_qualified(name))
                .collect(),
        )
    } else {
        None
    };

    let paths = commands::orphans::Paths {
        status_file: &cli.status_file,
        keep_file: &cli.keep_file,
        debfoster_file: cli
            .df_keep
            .then(|| Path::new(ds_io::DEFAULT_DEBFOSTER_FILE)),
    };
    let exclude = ds_core::ExcludeList::from_args(&cli.exclude);

    let missing = commands::orphans::run_orphans(&paths, &options, &exclude, targets)?;

    let prog = program_name();
    for target in &missing {
        eprintln!("{}: package {} not found or not installed", prog, target);
    }

    Ok(if missing.is_empty() { 0 } else { 1 })
}
