pub mod classify;
pub mod dep;
pub mod errors;
pub mod exclude;
pub mod keep;
pub mod options;
pub mod orphan;
pub mod package;
pub mod priority;
pub mod status_parser;

pub use classify::Classifier;
pub use dep::{Dep, name_hash, strip_char};
pub use errors::Error;
pub use exclude::ExcludeList;
pub use keep::{
    append_entries, find_duplicate, is_kept, keep_entry_name, merge_keep_lists, parse_keep_list,
    remove_entries,
};
pub use options::{DEFAULT_PRIORITY, GUESS_CATEGORIES, Guess, GuessSet, Options, ShowArch};
pub use orphan::{Finding, OrphanFinder, SearchSet};
pub use package::PkgInfo;
pub use priority::{priority_to_string, string_to_priority};
pub use status_parser::{Field, StatusDb, StatusParser, parse_status};
