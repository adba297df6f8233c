use anyhow::{Context, Result};
use std::io::Read;

/// Raw CSV contents: header row plus string-typed data rows.
#[derive(Debug, Clone)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read CSV from any reader. The first record is the header row; at least
/// one data row must follow.
pub fn read_csv<R: Read>(reader: R) -> Result<CsvData> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.context("Failed to read CSV record")?;
        rows.push(record.iter().map(String::from).collect());
    }

    if rows.is_empty() {
        anyhow::bail!("CSV must contain at least one data row");
    }

    Ok(CsvData { headers, rows })
}
