use std::sync::LazyLock;

use regex::Regex;

// Dense footer shape: `Software SIH25001 7 MedTech / BioTech`. Category and
// code are mandatory, ideas count and theme optional. The theme capture is
// greedy and swallows anything else sharing the line.
static FOOTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Software|Hardware)\s+(SIH\d{5})\s*(\d+)?\s*(.*)$").unwrap()
});

/// Positional fields recovered from a block's footer line.
#[derive(Debug, Clone, PartialEq)]
pub struct FooterFields {
    pub category: String,
    pub ps_code: String,
    pub ideas_count: Option<String>,
    pub theme: String,
}

pub fn is_footer_line(line: &str) -> bool {
    FOOTER_RE.is_match(line.trim())
}

/// Scan lines in order and parse the first one matching the footer shape.
/// Many blocks have none; that is a normal outcome.
pub fn parse_footer_line(block_text: &str) -> Option<FooterFields> {
    block_text.split('\n').find_map(|line| {
        let caps = FOOTER_RE.captures(line.trim())?;
        Some(FooterFields {
            category: caps[1].to_string(),
            ps_code: caps[2].to_string(),
            ideas_count: caps.get(3).map(|m| m.as_str().to_string()),
            theme: caps[4].trim().to_string(),
        })
    })
}
