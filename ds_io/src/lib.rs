pub mod keep_file;
pub mod status_file;

pub use keep_file::{DEFAULT_DEBFOSTER_FILE, DEFAULT_KEEP_FILE, KeepFile};
pub use status_file::{DEFAULT_STATUS_FILE, find_missing_package, load_packages, read_status_file};
