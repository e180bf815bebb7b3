// catalog module - the fixed list of pattern notes and selector resolution

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// pattern note labels, in the order the selector counts them (1-based)
///
/// each label doubles as the file stem of its markdown note. entries 9 and 10
/// are identical, so both ordinals open the same note.
pub const PATTERN_DOCS: [&str; 17] = [
    "✅ Pattern 01 : Sliding Window",
    "✅ Pattern 02: Two Pointers",
    "✅ Pattern 03: Fast & Slow pointers",
    "✅ Pattern 04 : Merge Intervals",
    "✅ Pattern 05: Cyclic Sort",
    "✅ Pattern 06: In-place Reversal of a LinkedList",
    "✅ Pattern 07: Tree Breadth First Search",
    "✅ Pattern 08:Tree Depth First Search",
    "✅ Pattern 09: Two Heaps",
    "✅ Pattern 09: Two Heaps",
    "✅ Pattern 10: Subsets",
    "✅ Pattern 11: Modified Binary Search",
    "✅ Pattern 12:  Bitwise XOR",
    "✅ Pattern 13: Top 'K' Elements",
    "✅ Pattern 14: K-way merge",
    "✅ Pattern 15: 0-1 Knapsack (Dynamic Programming)",
    "✅ Pattern 16: 🔎 Topological Sort (Graph)",
];

/// markdown extension appended to a label to get the note's file name
pub const DOCUMENT_EXTENSION: &str = ".md";

/// resolve a 1-based selector to its catalog label
pub fn resolve(selector: i64) -> Result<&'static str> {
    // zero and negatives must not wrap around to the end of the list
    selector
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| PATTERN_DOCS.get(index).copied())
        .ok_or_else(|| {
            anyhow!(
                "pattern selector {} is out of range (expected 1..={})",
                selector,
                PATTERN_DOCS.len()
            )
        })
}

/// path of the note for `label` inside `notes_dir`
pub fn document_path(notes_dir: &Path, label: &str) -> PathBuf {
    notes_dir.join(format!("{label}{DOCUMENT_EXTENSION}"))
}
