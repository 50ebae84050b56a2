use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use anyhow::{Context, Result};

use crate::io::table::Table;
use crate::timeline::extract::cell;

pub const SAMPLE_BARCODE_COLUMN: &str = "Tumor_Sample_Barcode";
pub const HUGO_SYMBOL_COLUMN: &str = "Hugo_Symbol";

/// Mutated gene symbols keyed by tumor sample barcode.
#[derive(Debug, Clone, Default)]
pub struct MutationIndex {
    by_sample: BTreeMap<String, BTreeSet<String>>,
}

impl MutationIndex {
    pub fn from_table(table: &Table) -> Result<Self> {
        let column = |name: &str| -> Result<usize> {
            table
                .headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("mutation table has no '{}' column", name))
        };
        let sample = column(SAMPLE_BARCODE_COLUMN)?;
        let symbol = column(HUGO_SYMBOL_COLUMN)?;

        let mut index = Self::default();
        for row in &table.rows {
            let barcode = cell(row, sample).trim();
            let hugo = cell(row, symbol).trim();
            if !barcode.is_empty() && !hugo.is_empty() {
                index.insert(barcode, hugo);
            }
        }
        Ok(index)
    }

    pub fn insert(&mut self, sample: &str, symbol: &str) {
        self.by_sample
            .entry(sample.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    pub fn samples(&self) -> usize {
        self.by_sample.len()
    }

    /// Symbols mutated in any sample whose barcode starts with `patient_id`.
    pub fn symbols_for(&self, patient_id: &str) -> BTreeSet<&str> {
        self.by_sample
            .range::<str, _>((Bound::Included(patient_id), Bound::Unbounded))
            .take_while(|(sample, _)| sample.starts_with(patient_id))
            .flat_map(|(_, symbols)| symbols.iter().map(String::as_str))
            .collect()
    }

    pub fn flags(&self, patient_id: &str, genes: &[String]) -> Vec<bool> {
        let symbols = self.symbols_for(patient_id);
        genes.iter().map(|g| symbols.contains(g.as_str())).collect()
    }
}
