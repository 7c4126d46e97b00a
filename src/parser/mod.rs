pub mod blocks;
pub mod fields;
pub mod footer;
pub mod record;

use scraper::Html;
use tracing::warn;

pub use record::ProblemStatement;

/// Three-pass pipeline: html → detail blocks → (labeled fields, footer
/// line) per block → assembled, deduplicated records.
///
/// A block that assembles to an entirely empty record is dropped; one
/// malformed block never aborts the others. Zero located blocks is a warned,
/// non-fatal outcome.
pub fn parse_listing(html: &str) -> Vec<ProblemStatement> {
    let doc = Html::parse_document(html);
    let detail_blocks = blocks::locate_blocks(&doc);
    if detail_blocks.is_empty() {
        warn!(
            "no \"{}\" blocks located; page structure may have changed",
            blocks::MARKER
        );
        return Vec::new();
    }

    let mut records = Vec::new();
    for block in &detail_blocks {
        let text = block.text();
        let labeled = fields::segment_fields(&text);
        let footer = footer::parse_footer_line(&text);
        let rec = record::assemble(&labeled, footer);
        if !rec.is_empty() {
            records.push(rec);
        }
    }

    record::dedup(records)
}
