use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::category::ExpressionCategory;

// ---------------------------------------------------------------------------
// GeneRecord – one validated measurement
// ---------------------------------------------------------------------------

/// One measurement: a gene's expression level under one condition.
///
/// Fields are private so every instance goes through [`GeneRecord::new`]:
/// `gene` and `condition` are non-empty, `expression` is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneRecord {
    gene: String,
    condition: String,
    expression: f64,
}

impl GeneRecord {
    /// Returns `None` when any invariant is violated.
    pub fn new(gene: impl Into<String>, condition: impl Into<String>, expression: f64) -> Option<Self> {
        let gene = gene.into();
        let condition = condition.into();
        if gene.is_empty() || condition.is_empty() || !expression.is_finite() {
            return None;
        }
        Some(GeneRecord {
            gene,
            condition,
            expression,
        })
    }

    pub fn gene(&self) -> &str {
        &self.gene
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn expression(&self) -> f64 {
        self.expression
    }

    pub fn category(&self) -> ExpressionCategory {
        ExpressionCategory::classify(self.expression)
    }
}

// ---------------------------------------------------------------------------
// Wire types returned by the remote API
// ---------------------------------------------------------------------------

/// One row of a gene search: the gene itself is the search key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionExpression {
    pub condition: String,
    pub expression: f64,
}

impl ConditionExpression {
    pub fn category(&self) -> ExpressionCategory {
        ExpressionCategory::classify(self.expression)
    }
}

// ---------------------------------------------------------------------------
// ExpressionRow – anything a record table can show
// ---------------------------------------------------------------------------

/// A table row: uploaded records carry their gene, search rows do not.
pub trait ExpressionRow {
    fn gene(&self) -> Option<&str>;
    fn condition(&self) -> &str;
    fn expression(&self) -> f64;

    fn category(&self) -> ExpressionCategory {
        ExpressionCategory::classify(self.expression())
    }
}

impl ExpressionRow for GeneRecord {
    fn gene(&self) -> Option<&str> {
        Some(&self.gene)
    }

    fn condition(&self) -> &str {
        &self.condition
    }

    fn expression(&self) -> f64 {
        self.expression
    }
}

impl ExpressionRow for ConditionExpression {
    fn gene(&self) -> Option<&str> {
        None
    }

    fn condition(&self) -> &str {
        &self.condition
    }

    fn expression(&self) -> f64 {
        self.expression
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGene {
    pub gene: String,
    pub count: u64,
}

/// Aggregates served by `GET /dashboard/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_genes: u64,
    pub total_conditions: u64,
    #[serde(default)]
    pub top_genes: Vec<TopGene>,
}

impl DashboardStats {
    /// The first entry of `top_genes`, which the server sorts by count.
    pub fn most_frequent(&self) -> Option<&TopGene> {
        self.top_genes.first()
    }

    /// Sum of the record counts over the listed top genes.
    pub fn data_points(&self) -> u64 {
        self.top_genes.iter().map(|g| g.count).sum()
    }
}

// ---------------------------------------------------------------------------
// ExpressionSeries – search results for one gene
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionSeries {
    pub gene: String,
    pub points: Vec<ConditionExpression>,
}

impl ExpressionSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GeneDataset – an uploaded set of records
// ---------------------------------------------------------------------------

/// The uploaded records with pre-computed unique genes and conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneDataset {
    pub records: Vec<GeneRecord>,
    pub genes: BTreeSet<String>,
    pub conditions: BTreeSet<String>,
}

impl GeneDataset {
    pub fn from_records(records: Vec<GeneRecord>) -> Self {
        let genes = records.iter().map(|r| r.gene.clone()).collect();
        let conditions = records.iter().map(|r| r.condition.clone()).collect();
        GeneDataset {
            records,
            genes,
            conditions,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records (or all of them when there are fewer).
    pub fn preview(&self, n: usize) -> &[GeneRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(gene: &str, condition: &str, expression: f64) -> GeneRecord {
        GeneRecord::new(gene, condition, expression).unwrap()
    }

    #[test]
    fn record_rejects_invalid_fields() {
        assert!(GeneRecord::new("", "Tumor", 1.0).is_none());
        assert!(GeneRecord::new("TP53", "", 1.0).is_none());
        assert!(GeneRecord::new("TP53", "Tumor", f64::NAN).is_none());
        assert!(GeneRecord::new("TP53", "Tumor", f64::INFINITY).is_none());
        assert!(GeneRecord::new("TP53", "Tumor", -0.5).is_some());
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let json = serde_json::to_value(rec("BRCA1", "Normal", 2.1)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "gene": "BRCA1", "condition": "Normal", "expression": 2.1 })
        );
    }

    #[test]
    fn dashboard_stats_from_camel_case() {
        let json = r#"{
            "totalGenes": 2,
            "totalConditions": 3,
            "topGenes": [
                { "gene": "TP53", "count": 4 },
                { "gene": "BRCA1", "count": 2 }
            ]
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_genes, 2);
        assert_eq!(stats.total_conditions, 3);
        assert_eq!(stats.most_frequent().map(|g| g.gene.as_str()), Some("TP53"));
        assert_eq!(stats.data_points(), 6);
    }

    #[test]
    fn empty_dashboard_stats() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{ "totalGenes": 0, "totalConditions": 0 }"#).unwrap();
        assert!(stats.most_frequent().is_none());
        assert_eq!(stats.data_points(), 0);
    }

    #[test]
    fn search_rows_are_table_rows_as_received() {
        let points = vec![
            ConditionExpression { condition: "Tumor".into(), expression: 6.0 },
            ConditionExpression { condition: "".into(), expression: 1.0 },
        ];
        let rows: Vec<(Option<&str>, &str, ExpressionCategory)> = points
            .iter()
            .map(|p| (ExpressionRow::gene(p), ExpressionRow::condition(p), ExpressionRow::category(p)))
            .collect();
        assert_eq!(
            rows,
            [
                (None, "Tumor", ExpressionCategory::High),
                (None, "", ExpressionCategory::Low),
            ]
        );

        let record = rec("EGFR", "Normal", 3.0);
        assert_eq!(ExpressionRow::gene(&record), Some("EGFR"));
        assert_eq!(ExpressionRow::category(&record), ExpressionCategory::Medium);
    }

    #[test]
    fn dataset_counts_unique_values() {
        let ds = GeneDataset::from_records(vec![
            rec("BRCA1", "Normal", 2.1),
            rec("BRCA1", "Tumor", 7.8),
            rec("TP53", "Normal", 1.5),
            rec("TP53", "Normal", 1.5),
        ]);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.genes.len(), 2);
        assert_eq!(ds.conditions.len(), 2);
        assert_eq!(ds.preview(2).len(), 2);
        assert_eq!(ds.preview(10).len(), 4);
    }
}
