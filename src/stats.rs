use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;

use crate::data::Table;

/// Per-group aggregate of the value column. Deviation and error use the
/// sample (n-1) convention and are None for a single observation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub key: String,
    pub values: Vec<f64>,
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub std_err: Option<f64>,
}

/// Group the value column by the group column and summarize each group.
///
/// The returned Vec is in first-occurrence order of the group values,
/// scanned top to bottom; bar placement and color lookup follow this order.
/// A value cell that does not parse as f64 fails the whole aggregation.
pub fn aggregate(table: &Table, group_col: &str, value_col: &str) -> Result<Vec<GroupSummary>> {
    let group_idx = table
        .column_index(group_col)
        .ok_or_else(|| anyhow!("Group column '{}' not found in table headers", group_col))?;
    let value_idx = table
        .column_index(value_col)
        .ok_or_else(|| anyhow!("Value column '{}' not found in table headers", value_col))?;

    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<f64>> = HashMap::new();

    for (row_num, row) in table.rows.iter().enumerate() {
        let key = row
            .get(group_idx)
            .ok_or_else(|| anyhow!("Row {} is missing the group column", row_num + 1))?
            .clone();
        let raw = row
            .get(value_idx)
            .ok_or_else(|| anyhow!("Row {} is missing the value column", row_num + 1))?;
        let value: f64 = raw.parse().context(format!(
            "Failed to parse value '{}' in column '{}' (row {})",
            raw,
            value_col,
            row_num + 1
        ))?;

        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(value);
    }

    let mut summaries = Vec::with_capacity(order.len());
    for key in order {
        let values = buckets.remove(&key).unwrap_or_default();
        summaries.push(summarize(key, values));
    }

    Ok(summaries)
}

fn summarize(key: String, values: Vec<f64>) -> GroupSummary {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let (std_dev, std_err) = if values.len() > 1 {
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std_dev = variance.sqrt();
        (Some(std_dev), Some(std_dev / n.sqrt()))
    } else {
        (None, None)
    };

    GroupSummary {
        key,
        values,
        mean,
        std_dev,
        std_err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_first_occurrence_order_preserved() {
        let t = table(
            &["grp", "val"],
            &[&["B", "1"], &["A", "2"], &["B", "3"], &["C", "4"], &["A", "5"]],
        );
        let summaries = aggregate(&t, "grp", "val").unwrap();
        let keys: Vec<&str> = summaries.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_known_aggregates() {
        // grp = [A, A, B, B, B], val = [1, 3, 2, 4, 6]
        let t = table(
            &["grp", "val"],
            &[&["A", "1"], &["A", "3"], &["B", "2"], &["B", "4"], &["B", "6"]],
        );
        let summaries = aggregate(&t, "grp", "val").unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].key, "A");
        assert_eq!(summaries[0].mean, 2.0);
        assert_eq!(summaries[1].key, "B");
        assert_eq!(summaries[1].mean, 4.0);
    }

    #[test]
    fn test_sample_deviation_and_error() {
        let t = table(&["g", "v"], &[&["X", "2"], &["X", "4"], &["X", "6"]]);
        let summaries = aggregate(&t, "g", "v").unwrap();
        let s = &summaries[0];
        assert_eq!(s.mean, 4.0);
        assert!((s.std_dev.unwrap() - 2.0).abs() < 1e-12);
        assert!((s.std_err.unwrap() - 2.0 / 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_observation_group() {
        let t = table(&["g", "v"], &[&["X", "7.5"]]);
        let summaries = aggregate(&t, "g", "v").unwrap();
        let s = &summaries[0];
        assert_eq!(s.mean, 7.5);
        assert_eq!(s.std_dev, None);
        assert_eq!(s.std_err, None);
    }

    #[test]
    fn test_aggregate_is_pure() {
        let t = table(
            &["grp", "val"],
            &[&["A", "1"], &["B", "2"], &["A", "3"]],
        );
        let first = aggregate(&t, "grp", "val").unwrap();
        let second = aggregate(&t, "grp", "val").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_column() {
        let t = table(&["grp", "val"], &[&["A", "1"]]);
        assert!(aggregate(&t, "missing", "val").is_err());
        assert!(aggregate(&t, "grp", "missing").is_err());
    }

    #[test]
    fn test_non_numeric_value_fails_fast() {
        let t = table(&["grp", "val"], &[&["A", "1"], &["A", "oops"]]);
        let err = aggregate(&t, "grp", "val").unwrap_err();
        assert!(err.to_string().contains("oops"));
    }
}
