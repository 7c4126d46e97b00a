use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::footer;

/// Labels recognized inside a detail block, in the order the page lists them.
pub const DETAIL_KEYS: [&str; 12] = [
    "Problem Statement ID",
    "Problem Statement Title",
    "Description",
    "Background",
    "Expected Solution",
    "Organization",
    "Department",
    "Category",
    "Theme",
    "Youtube Link",
    "Dataset Link",
    "Contact info",
];

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n•\s*").unwrap());

/// Slice one block's normalized text into label → value spans.
///
/// Physical order in the text governs the slicing, not vocabulary order:
/// every found label line becomes a boundary and a label's value is whatever
/// sits between its own line and the next boundary. A footer line
/// (`Software SIH25001 ...`) is also a boundary, carrying no value of its
/// own, so the last labeled value does not absorb it. Labels that never
/// appear are simply missing keys; a label followed directly by another
/// label keeps an empty value.
pub fn segment_fields(block_text: &str) -> HashMap<&'static str, String> {
    let lines: Vec<&str> = block_text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let text = lines.join("\n");

    // First occurrence per label wins; offsets are byte positions in `text`.
    let mut label_at: HashMap<&'static str, (usize, usize)> = HashMap::new();
    let mut cuts: Vec<usize> = Vec::new();
    let mut offset = 0usize;
    for line in text.split('\n') {
        for key in DETAIL_KEYS {
            if !label_at.contains_key(key) && line.eq_ignore_ascii_case(key) {
                label_at.insert(key, (offset, line.len()));
            }
        }
        if footer::is_footer_line(line) {
            cuts.push(offset);
        }
        offset += line.len() + 1;
    }

    if label_at.is_empty() {
        return HashMap::new();
    }

    let mut positions: Vec<(usize, usize, &'static str)> = label_at
        .into_iter()
        .map(|(key, (start, len))| (start, len, key))
        .collect();
    positions.sort_by_key(|p| p.0);

    let mut data = HashMap::new();
    for (i, &(start, len, key)) in positions.iter().enumerate() {
        let mut end = positions.get(i + 1).map(|p| p.0).unwrap_or(text.len());
        if let Some(&cut) = cuts.iter().find(|&&c| c > start && c < end) {
            end = cut;
        }
        let value = text[start + len..end].trim();
        let value = BULLET_RE.replace_all(value, "\n• ");
        data.insert(key, value.trim().to_string());
    }
    data
}
