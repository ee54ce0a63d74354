//! Package priority levels.
//!
//! dpkg priorities map to small integers, most important first:
//! `required` = 1, `important` = 2, `standard` = 3, `optional` = 4,
//! `extra` = 5. Anything unrecognised is 0 ("unknown").

const PRIORITY_NAMES: [&str; 6] = [
    "unknown",
    "required",
    "important",
    "standard",
    "optional",
    "extra",
];

/// Map a priority name to its level. Only the first letter is inspected,
/// case-insensitively.
pub fn string_to_priority(priority: &str) -> i32 {
    match priority.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('R') => 1,
        Some('I') => 2,
        Some('S') => 3,
        Some('O') => 4,
        Some('E') => 5,
        _ => 0,
    }
}

/// Name of a priority level; out-of-range levels are "unknown".
pub fn priority_to_string(priority: i32) -> &'static str {
    usize::try_from(priority)
        .ok()
        .and_then(|i| PRIORITY_NAMES.get(i))
        .copied()
        .unwrap_or(PRIORITY_NAMES[0])
}
