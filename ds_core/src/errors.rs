use std::fmt;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    InvalidStatusFile {
        line: String,
    },
    ImproperState {
        package: Option<String>,
        status: String,
    },
    Io {
        path: PathBuf,
        message: String,
    },
    InvalidPriority {
        value: String,
    },
    Usage {
        message: String,
    },
    TooManyArguments {
        count: usize,
        max: usize,
    },
    NoSuchPackage {
        name: String,
    },
    DuplicateKeep {
        name: String,
    },
    NothingRemoved,
    InvalidPattern {
        pattern: String,
        message: String,
    },
}

impl Error {
    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Whether the caller should remind the user of the command syntax.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::Usage { .. } | Error::InvalidPriority { .. } | Error::TooManyArguments { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidStatusFile { line } => {
                write!(f, "invalid status file: malformed line '{}'", line)?;
                write!(
                    f,
                    "\n  hint: the package database looks damaged; compare it with its backup (status-old)"
                )
            }
            Error::ImproperState { package, status } => {
                write!(f, "package")?;
                if let Some(name) = package {
                    write!(f, " '{}'", name)?;
                }
                write!(f, " is in an improper state ({})", status)?;
                write!(
                    f,
                    "\n  hint: run 'dpkg --audit' and finish or revert pending installations first"
                )
            }
            Error::Io { path, message } => {
                write!(f, "{}: {}", path.to_string_lossy(), message)
            }
            Error::InvalidPriority { value } => {
                write!(
                    f,
                    "invalid priority: {}\n  hint: use a number from 0 to 5 or one of required, important, standard, optional, extra",
                    value
                )
            }
            Error::Usage { message } => write!(f, "{}", message),
            Error::TooManyArguments { count, max } => {
                write!(
                    f,
                    "argument list too long ({} package names, at most {} allowed)",
                    count, max
                )
            }
            Error::NoSuchPackage { name } => write!(f, "{}: no such package.", name),
            Error::DuplicateKeep { name } => write!(f, "{}: duplicate entry.", name),
            Error::NothingRemoved => write!(f, "no packages removed."),
            Error::InvalidPattern { pattern, message } => {
                write!(f, "invalid pattern '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for Error {}
