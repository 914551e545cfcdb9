use std::fmt;
use std::io::Read;
use std::path::Path;

use super::error::IngestError;
use super::model::GeneRecord;

/// Columns every upload must name in its header row.
pub const GENE_COLUMN: &str = "gene";
pub const CONDITION_COLUMN: &str = "condition";
pub const EXPRESSION_COLUMN: &str = "expression";

/// Shown next to the upload widget.
pub const FORMAT_EXAMPLE: &str = "gene,condition,expression
BRCA1,Normal,2.1
BRCA1,Tumor,7.8
TP53,Normal,1.5
TP53,Tumor,6.3";

// ---------------------------------------------------------------------------
// Ingestion result
// ---------------------------------------------------------------------------

/// Why a data row was left out of the result.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The named column is absent or blank in this row.
    MissingField(&'static str),
    /// The expression cell is not a finite number.
    InvalidExpression(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingField(col) => write!(f, "missing '{col}'"),
            SkipReason::InvalidExpression(raw) => write!(f, "'{raw}' is not a number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the source text.
    pub line: u64,
    pub reason: SkipReason,
}

/// Valid records in input order plus the rows that were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub records: Vec<GeneRecord>,
    pub skipped: Vec<SkippedRow>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Accept only names ending in `.csv` (any case). Content is not inspected.
pub fn check_file_name(file_name: &str) -> Result<(), IngestError> {
    if file_name.trim().to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(IngestError::InvalidFileType {
            file_name: file_name.to_string(),
        })
    }
}

/// Check the extension, then read and validate the file.
pub fn load_file(path: &Path) -> Result<IngestReport, IngestError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    check_file_name(&file_name)?;

    let file = std::fs::File::open(path)?;
    let report = parse_reader(file)?;
    log::info!(
        "Ingested {} records from {} ({} rows skipped)",
        report.records.len(),
        path.display(),
        report.skipped.len()
    );
    Ok(report)
}

pub fn parse_str(text: &str) -> Result<IngestReport, IngestError> {
    parse_reader(text.as_bytes())
}

/// CSV layout: a header row naming `gene`, `condition` and `expression`
/// (exact, case-sensitive, any order). Other columns are ignored.
///
/// A row is kept only when all three cells are non-blank and `expression`
/// parses to a finite number; anything else is skipped without touching the
/// neighbouring rows. A reader failure aborts the whole attempt, and so does
/// ending up with zero valid rows.
pub fn parse_reader<R: Read>(source: R) -> Result<IngestReport, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let gene_idx = column(GENE_COLUMN);
    let condition_idx = column(CONDITION_COLUMN);
    let expression_idx = column(EXPRESSION_COLUMN);

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .filter(|value| !value.is_empty())
        };

        let (gene, condition, raw_expression) =
            match (cell(gene_idx), cell(condition_idx), cell(expression_idx)) {
                (Some(gene), Some(condition), Some(expression)) => (gene, condition, expression),
                (None, _, _) => {
                    skip_missing(&mut skipped, line, GENE_COLUMN);
                    continue;
                }
                (_, None, _) => {
                    skip_missing(&mut skipped, line, CONDITION_COLUMN);
                    continue;
                }
                (_, _, None) => {
                    skip_missing(&mut skipped, line, EXPRESSION_COLUMN);
                    continue;
                }
            };

        let parsed = raw_expression.parse::<f64>().ok();
        match parsed.and_then(|expression| GeneRecord::new(gene, condition, expression)) {
            Some(record) => records.push(record),
            None => {
                log::debug!("line {line}: skipping row, expression '{raw_expression}' is not a number");
                skipped.push(SkippedRow {
                    line,
                    reason: SkipReason::InvalidExpression(raw_expression.to_string()),
                });
            }
        }
    }

    if records.is_empty() {
        return Err(IngestError::NoValidData { skipped });
    }

    Ok(IngestReport { records, skipped })
}

fn skip_missing(skipped: &mut Vec<SkippedRow>, line: u64, column: &'static str) {
    log::debug!("line {line}: skipping row, missing '{column}'");
    skipped.push(SkippedRow {
        line,
        reason: SkipReason::MissingField(column),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::category::ExpressionCategory;

    #[test]
    fn sample_upload_round_trip() {
        let report = parse_str(FORMAT_EXAMPLE).unwrap();
        let summary: Vec<_> = report
            .records
            .iter()
            .map(|r| (r.gene(), r.condition(), r.expression(), r.category()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("BRCA1", "Normal", 2.1, ExpressionCategory::Medium),
                ("BRCA1", "Tumor", 7.8, ExpressionCategory::High),
                ("TP53", "Normal", 1.5, ExpressionCategory::Low),
                ("TP53", "Tumor", 6.3, ExpressionCategory::High),
            ]
        );
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn row_missing_expression_is_dropped() {
        let report = parse_str("gene,condition,expression\nBRCA1,Normal,\nTP53,Tumor,6.3").unwrap();
        assert_eq!(report.records.len(), 1);
        let r = &report.records[0];
        assert_eq!((r.gene(), r.condition(), r.expression()), ("TP53", "Tumor", 6.3));
        assert_eq!(
            report.skipped,
            vec![SkippedRow {
                line: 2,
                reason: SkipReason::MissingField(EXPRESSION_COLUMN)
            }]
        );
    }

    #[test]
    fn non_numeric_expression_does_not_affect_siblings() {
        let text = "gene,condition,expression\nA,x,1.0\nB,y,high\nC,z,NaN\nD,w,inf\nE,v,3";
        let report = parse_str(text).unwrap();
        let genes: Vec<_> = report.records.iter().map(|r| r.gene()).collect();
        assert_eq!(genes, ["A", "E"]);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::InvalidExpression("high".into())
        );
    }

    #[test]
    fn columns_matched_by_name_and_extras_ignored() {
        let text = "sample,expression,gene,condition\ns1,4.2,MYC,Treated\ns2,0.3,KRAS,Control";
        let report = parse_str(text).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].gene(), "MYC");
        assert_eq!(report.records[0].condition(), "Treated");
        assert_eq!(report.records[0].expression(), 4.2);
    }

    #[test]
    fn duplicates_and_order_preserved() {
        let text = "gene,condition,expression\nB,x,1\nA,x,1\nB,x,1";
        let report = parse_str(text).unwrap();
        let genes: Vec<_> = report.records.iter().map(|r| r.gene()).collect();
        assert_eq!(genes, ["B", "A", "B"]);
    }

    #[test]
    fn header_match_is_case_sensitive() {
        let err = parse_str("Gene,Condition,Expression\nBRCA1,Normal,2.1").unwrap_err();
        assert_eq!(
            err,
            IngestError::NoValidData {
                skipped: vec![SkippedRow {
                    line: 2,
                    reason: SkipReason::MissingField(GENE_COLUMN)
                }]
            }
        );
    }

    #[test]
    fn short_rows_are_dropped_not_fatal() {
        let report = parse_str("gene,condition,expression\nBRCA1,Normal\nTP53,Tumor,6.3").unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::MissingField(EXPRESSION_COLUMN));
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let report = parse_str("gene,condition,expression\n  ,Normal,1.0\nTP53, Tumor , 6.3 ").unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].condition(), "Tumor");
        assert_eq!(report.skipped[0].reason, SkipReason::MissingField(GENE_COLUMN));
    }

    #[test]
    fn zero_valid_rows_is_an_error() {
        let nothing = IngestError::NoValidData { skipped: Vec::new() };
        assert_eq!(parse_str("").unwrap_err(), nothing);
        assert_eq!(parse_str("gene,condition,expression\n").unwrap_err(), nothing);
        assert_eq!(
            parse_str("gene,condition,expression\nA,,1\nB,y,z").unwrap_err(),
            IngestError::NoValidData {
                skipped: vec![
                    SkippedRow {
                        line: 2,
                        reason: SkipReason::MissingField(CONDITION_COLUMN)
                    },
                    SkippedRow {
                        line: 3,
                        reason: SkipReason::InvalidExpression("z".into())
                    },
                ]
            }
        );
    }

    #[test]
    fn trailing_garbage_after_a_number_is_rejected() {
        let report = parse_str("gene,condition,expression\nA,x,2.1abc\nB,y,1.5e\nC,z,2.1").unwrap();
        let genes: Vec<_> = report.records.iter().map(|r| r.gene()).collect();
        assert_eq!(genes, ["C"]);
        assert_eq!(
            report.skipped,
            vec![
                SkippedRow {
                    line: 2,
                    reason: SkipReason::InvalidExpression("2.1abc".into())
                },
                SkippedRow {
                    line: 3,
                    reason: SkipReason::InvalidExpression("1.5e".into())
                },
            ]
        );
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let bytes: &[u8] = b"gene,condition,expression\nBR\xffCA1,Normal,2.1\n";
        match parse_reader(bytes) {
            Err(IngestError::Parse(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn file_name_check() {
        assert!(check_file_name("data.csv").is_ok());
        assert!(check_file_name("DATA.CSV").is_ok());
        assert!(check_file_name(" data.csv ").is_ok());
        assert_eq!(
            check_file_name("data.txt"),
            Err(IngestError::InvalidFileType {
                file_name: "data.txt".into()
            })
        );
        assert!(check_file_name("csv").is_err());
    }

    #[test]
    fn load_file_rejects_extension_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, FORMAT_EXAMPLE).unwrap();
        assert!(matches!(
            load_file(&path),
            Err(IngestError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn load_file_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.csv");
        std::fs::write(&path, FORMAT_EXAMPLE).unwrap();
        let report = load_file(&path).unwrap();
        assert_eq!(report.records.len(), 4);
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.csv");
        assert!(matches!(load_file(&path), Err(IngestError::Parse(_))));
    }
}
