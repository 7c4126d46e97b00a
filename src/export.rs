use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rust_xlsxwriter::Workbook;

use crate::parser::record::FIELD_NAMES;
use crate::parser::ProblemStatement;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
    #[value(alias = "excel")]
    Xlsx,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xlsx => "xlsx",
        }
    }
}

/// Write every requested format as `{out_base}.{ext}` and return the paths.
pub fn export_all(
    records: &[ProblemStatement],
    out_base: &str,
    formats: &[Format],
) -> Result<Vec<String>> {
    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = format!("{}.{}", out_base, format.extension());
        match format {
            Format::Csv => write_csv(records, &path)?,
            Format::Json => write_json(records, &path)?,
            Format::Xlsx => write_xlsx(records, &path)?,
        }
        written.push(path);
    }
    Ok(written)
}

/// UTF-8 with BOM so spreadsheet tools pick the encoding up; absent fields
/// render as empty cells.
fn write_csv(records: &[ProblemStatement], path: &str) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("Failed to create {path}"))?;
    file.write_all(UTF8_BOM)?;
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    write_csv_rows(records, &mut wtr)
}

fn write_csv_rows<W: Write>(records: &[ProblemStatement], wtr: &mut csv::Writer<W>) -> Result<()> {
    // Header written by hand so empty record sets still get one.
    wtr.write_record(FIELD_NAMES)?;
    for rec in records {
        wtr.serialize(rec)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 2-space indent, `null` for absent fields, non-ASCII left literal.
fn write_json(records: &[ProblemStatement], path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
    Ok(())
}

/// Single worksheet, same rows and columns as the CSV.
fn write_xlsx(records: &[ProblemStatement], path: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in FIELD_NAMES.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (row, rec) in records.iter().enumerate() {
        for (col, value) in rec.field_values().iter().enumerate() {
            if let Some(v) = value {
                sheet.write_string(row as u32 + 1, col as u16, *v)?;
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ProblemStatement> {
        vec![
            ProblemStatement {
                problem_statement_id: Some("25001".into()),
                problem_statement_title: Some("Detect Anomalies".into()),
                theme: Some("MedTech / BioTech".into()),
                organization: Some("स्वास्थ्य मंत्रालय".into()),
                ps_code: Some("SIH25001".into()),
                ideas_count: Some("7".into()),
                ..Default::default()
            },
            ProblemStatement {
                problem_statement_id: Some("25002".into()),
                category: Some("Hardware".into()),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let records = sample();
        let json = serde_json::to_string_pretty(&records).unwrap();
        // Non-ASCII stays literal, absent fields serialize as null.
        assert!(json.contains("स्वास्थ्य मंत्रालय"));
        assert!(json.contains("\"description\": null"));
        let back: Vec<ProblemStatement> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn csv_round_trip_maps_empty_cells_to_absent() {
        let records = sample();
        let mut bytes = Vec::new();
        {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut bytes);
            write_csv_rows(&records, &mut wtr).unwrap();
        }

        let mut rdr = csv::Reader::from_reader(bytes.as_slice());
        let back: Vec<ProblemStatement> = rdr
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(back, records);
        assert_eq!(back[1].description, None);
    }

    #[test]
    fn csv_file_starts_with_bom() {
        let path = std::env::temp_dir().join("sih_scraper_bom_test.csv");
        write_csv(&sample(), path.to_str().unwrap()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn xlsx_writes_without_error() {
        let path = std::env::temp_dir().join("sih_scraper_test.xlsx");
        write_xlsx(&sample(), path.to_str().unwrap()).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn excel_is_an_alias_for_xlsx() {
        assert_eq!(
            <Format as ValueEnum>::from_str("excel", true).unwrap(),
            Format::Xlsx
        );
        assert_eq!(Format::Xlsx.extension(), "xlsx");
    }
}
