use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

/// Heading text that marks one listing record on the page.
pub const MARKER: &str = "Problem Statement Details";

/// How many ancestor elements to climb from a marker text node to capture
/// the whole record card, not just the heading.
const ANCESTOR_LEVELS: usize = 5;

static MARKER_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bProblem Statement Details\b").unwrap());
static HWS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// One candidate record: a real DOM container, or a slice of the flat page
/// text when the DOM scan comes up empty. Both answer the same
/// render-to-text operation.
pub enum DetailBlock<'a> {
    Element(ElementRef<'a>),
    Synthetic(String),
}

impl DetailBlock<'_> {
    /// Normalized block text: tags become newlines, horizontal whitespace
    /// collapses to single spaces.
    pub fn text(&self) -> String {
        match self {
            DetailBlock::Element(el) => normalize_text(el.text()),
            DetailBlock::Synthetic(s) => s.clone(),
        }
    }
}

/// Trim every text fragment, drop the empties, join with newlines, collapse
/// runs of spaces/tabs.
pub fn normalize_text<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = fragments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    HWS_RE.replace_all(&joined, " ").trim().to_string()
}

/// Find every record container: text nodes holding the marker phrase,
/// climbed [`ANCESTOR_LEVELS`] parents, deduped by node identity so two
/// marker hits inside one card emit one block. Falls back to splitting the
/// flat page text when the DOM scan finds nothing.
pub fn locate_blocks(doc: &Html) -> Vec<DetailBlock<'_>> {
    let marker_lower = MARKER.to_ascii_lowercase();
    let mut seen = HashSet::new();
    let mut blocks = Vec::new();

    for node in doc.tree.nodes() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        if !text.to_ascii_lowercase().contains(&marker_lower) {
            continue;
        }

        let mut container = node;
        for _ in 0..ANCESTOR_LEVELS {
            match container.parent() {
                Some(parent) if parent.value().is_element() => container = parent,
                _ => break,
            }
        }

        if let Some(el) = ElementRef::wrap(container) {
            if seen.insert(container.id()) {
                blocks.push(DetailBlock::Element(el));
            }
        }
    }

    if blocks.is_empty() {
        return synthetic_blocks(&normalize_text(doc.root_element().text()));
    }
    blocks
}

/// Fallback splitter for when the markup structure shifts: cut the flat page
/// text on the marker phrase and wrap each following segment as a synthetic
/// block, marker line restored so downstream slicing stays marker-anchored.
pub fn synthetic_blocks(full_text: &str) -> Vec<DetailBlock<'static>> {
    MARKER_SPLIT_RE
        .split(full_text)
        .skip(1)
        .map(|part| DetailBlock::Synthetic(format!("{MARKER}\n{part}")))
        .collect()
}
