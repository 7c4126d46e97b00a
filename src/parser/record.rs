use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::footer::FooterFields;

/// One scraped problem statement. Every field is optional: the listing page
/// is inconsistent across entries and a missing field is a normal outcome,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemStatement {
    pub problem_statement_id: Option<String>,
    pub problem_statement_title: Option<String>,
    pub description: Option<String>,
    pub background: Option<String>,
    pub expected_solution: Option<String>,
    pub organization: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub theme: Option<String>,
    pub youtube_link: Option<String>,
    pub dataset_link: Option<String>,
    pub contact_info: Option<String>,
    /// Short code of shape SIH + 5 digits, from the footer line.
    pub ps_code: Option<String>,
    pub ideas_count: Option<String>,
    /// Category as inferred from the footer line.
    pub list_category: Option<String>,
    /// Theme as inferred from the footer line.
    pub list_theme: Option<String>,
}

/// Column order for CSV/XLSX export; matches the struct declaration order
/// serde uses for JSON.
pub const FIELD_NAMES: [&str; 16] = [
    "problem_statement_id",
    "problem_statement_title",
    "description",
    "background",
    "expected_solution",
    "organization",
    "department",
    "category",
    "theme",
    "youtube_link",
    "dataset_link",
    "contact_info",
    "ps_code",
    "ideas_count",
    "list_category",
    "list_theme",
];

impl ProblemStatement {
    pub fn field_values(&self) -> [Option<&str>; 16] {
        [
            self.problem_statement_id.as_deref(),
            self.problem_statement_title.as_deref(),
            self.description.as_deref(),
            self.background.as_deref(),
            self.expected_solution.as_deref(),
            self.organization.as_deref(),
            self.department.as_deref(),
            self.category.as_deref(),
            self.theme.as_deref(),
            self.youtube_link.as_deref(),
            self.dataset_link.as_deref(),
            self.contact_info.as_deref(),
            self.ps_code.as_deref(),
            self.ideas_count.as_deref(),
            self.list_category.as_deref(),
            self.list_theme.as_deref(),
        ]
    }

    /// Discard gate: no field carries any text at all.
    pub fn is_empty(&self) -> bool {
        self.field_values()
            .iter()
            .all(|v| v.map_or(true, str::is_empty))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn missing(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

/// Merge labeled fields and the footer match into one record. Category and
/// theme fall back to the footer-inferred values when the labeled variant is
/// missing: some page variants only carry them in the dense footer line.
pub fn assemble(
    fields: &HashMap<&'static str, String>,
    footer: Option<FooterFields>,
) -> ProblemStatement {
    let get = |key: &str| fields.get(key).cloned();

    let mut rec = ProblemStatement {
        problem_statement_id: get("Problem Statement ID"),
        problem_statement_title: get("Problem Statement Title"),
        description: get("Description"),
        background: get("Background"),
        expected_solution: get("Expected Solution"),
        organization: get("Organization"),
        department: get("Department"),
        category: get("Category"),
        theme: get("Theme"),
        youtube_link: get("Youtube Link"),
        dataset_link: get("Dataset Link"),
        contact_info: get("Contact info"),
        ..Default::default()
    };

    if let Some(f) = footer {
        rec.ps_code = non_empty(f.ps_code);
        rec.ideas_count = f.ideas_count.and_then(non_empty);
        rec.list_category = non_empty(f.category);
        rec.list_theme = non_empty(f.theme);
    }

    if missing(&rec.category) && rec.list_category.is_some() {
        rec.category = rec.list_category.clone();
    }
    if missing(&rec.theme) && rec.list_theme.is_some() {
        rec.theme = rec.list_theme.clone();
    }

    rec
}

/// Collapse records sharing an identity key, first occurrence wins, relative
/// order preserved. Records with no recoverable identity get a key unique to
/// their pre-dedup position so they are never merged with each other.
pub fn dedup(records: Vec<ProblemStatement>) -> Vec<ProblemStatement> {
    let mut seen: HashSet<String> = HashSet::new();
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, rec)| seen.insert(identity_key(&rec, i)).then_some(rec))
        .collect()
}

fn identity_key(rec: &ProblemStatement, position: usize) -> String {
    let id = rec.problem_statement_id.as_deref().unwrap_or("").trim();
    if !id.is_empty() {
        return id.to_string();
    }
    let code = rec.ps_code.as_deref().unwrap_or("").trim();
    if !code.is_empty() {
        return code.to_string();
    }
    format!("UNK-{position}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{fields, footer};

    fn assemble_text(text: &str) -> ProblemStatement {
        let labeled = fields::segment_fields(text);
        let f = footer::parse_footer_line(text);
        assemble(&labeled, f)
    }

    #[test]
    fn assembles_block_with_footer_fallback() {
        let text = "Problem Statement Details\nProblem Statement ID\n25001\nProblem Statement Title\nDetect Anomalies\nSoftware SIH25001 3 HealthTech";
        let rec = assemble_text(text);
        assert_eq!(rec.problem_statement_id.as_deref(), Some("25001"));
        assert_eq!(rec.problem_statement_title.as_deref(), Some("Detect Anomalies"));
        assert_eq!(rec.ps_code.as_deref(), Some("SIH25001"));
        assert_eq!(rec.ideas_count.as_deref(), Some("3"));
        // Direct category/theme labels are absent, so both fill from the footer.
        assert_eq!(rec.category.as_deref(), Some("Software"));
        assert_eq!(rec.theme.as_deref(), Some("HealthTech"));
        assert_eq!(rec.list_category.as_deref(), Some("Software"));
        assert_eq!(rec.list_theme.as_deref(), Some("HealthTech"));
    }

    #[test]
    fn direct_category_beats_footer() {
        let text = "Category\nBlockchain\nTheme\nFinTech\nSoftware SIH25009 2 Other";
        let rec = assemble_text(text);
        assert_eq!(rec.category.as_deref(), Some("Blockchain"));
        assert_eq!(rec.theme.as_deref(), Some("FinTech"));
        assert_eq!(rec.list_category.as_deref(), Some("Software"));
        assert_eq!(rec.list_theme.as_deref(), Some("Other"));
    }

    #[test]
    fn empty_footer_captures_become_absent() {
        let rec = assemble_text("Organization\nAcme\nSoftware SIH25010");
        assert_eq!(rec.ps_code.as_deref(), Some("SIH25010"));
        assert_eq!(rec.ideas_count, None);
        assert_eq!(rec.list_theme, None);
        assert_eq!(rec.theme, None);
    }

    #[test]
    fn empty_record_detected() {
        assert!(ProblemStatement::default().is_empty());
        let rec = assemble_text("Category\nTheme");
        // Labels found but both values empty: still an empty record.
        assert!(rec.is_empty());
        let rec = assemble_text("Organization\nAcme");
        assert!(!rec.is_empty());
    }

    #[test]
    fn dedup_keeps_first_by_id() {
        let a = ProblemStatement {
            problem_statement_id: Some("25001".into()),
            problem_statement_title: Some("first".into()),
            ..Default::default()
        };
        let b = ProblemStatement {
            problem_statement_id: Some("25001".into()),
            problem_statement_title: Some("second".into()),
            ..Default::default()
        };
        let out = dedup(vec![a.clone(), b]);
        assert_eq!(out, vec![a]);
    }

    #[test]
    fn dedup_falls_back_to_ps_code() {
        let a = ProblemStatement {
            ps_code: Some("SIH25001".into()),
            ..Default::default()
        };
        let b = ProblemStatement {
            ps_code: Some("SIH25001".into()),
            ..Default::default()
        };
        assert_eq!(dedup(vec![a, b]).len(), 1);
    }

    #[test]
    fn identityless_records_never_merge() {
        let a = ProblemStatement {
            problem_statement_title: Some("one".into()),
            ..Default::default()
        };
        let b = ProblemStatement {
            problem_statement_title: Some("two".into()),
            ..Default::default()
        };
        assert_eq!(dedup(vec![a, b]).len(), 2);
    }
}
