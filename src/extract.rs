// extraction module - pulls rhai fragments out of a note
//
// a fragment runs from the opening fence to the first double blank line after
// it. the closing fence is not looked for, so notes must leave two blank
// lines after every example.

use lazy_static::lazy_static;
use regex::Regex;

/// opening fence token; its length is the prefix stripped before execution
pub const FENCE_MARKER: &str = "```rhai";

lazy_static! {
    static ref FRAGMENT_PATTERN: Regex = Regex::new(&format!(
        r"(?s){}\n.*?\n\n\n",
        regex::escape(FENCE_MARKER)
    ))
    .unwrap();
}

/// find every fragment in document order, each including its fence marker
pub fn extract_fragments(text: &str) -> Vec<&str> {
    FRAGMENT_PATTERN
        .find_iter(text)
        .map(|found| found.as_str())
        .collect()
}

/// the executable part of a fragment: everything after the fence marker
pub fn fragment_source(fragment: &str) -> &str {
    fragment.get(FENCE_MARKER.len()..).unwrap_or_default()
}
