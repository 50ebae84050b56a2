use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::open_maybe_gz;

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn read_table(path: &Path, delimiter: u8) -> Result<Table> {
    let reader = open_maybe_gz(path)?;
    parse_table(reader, delimiter, &path.display().to_string())
}

pub fn parse_table(reader: impl std::io::Read, delimiter: u8, source: &str) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("{}: failed to read header", source))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        bail!("{}: empty header", source);
    }

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("{}:{} malformed row", source, idx + 2))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.len() < headers.len() {
            row.resize(headers.len(), String::new());
        }
        rows.push(row);
    }

    Ok(Table { headers, rows })
}
