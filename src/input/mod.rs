use std::collections::HashMap;

use anyhow::{Context, Result, bail};

use crate::config::ColumnPrefixes;

pub const PATIENT_ID_COLUMN: &str = "patient_id";
pub const STATUS_COLUMN: &str = "status";
pub const SURVIVAL_COLUMN: &str = "survival_in_days";
pub const GENE_PREFIX: &str = "gene_";

pub const STATIC_COLUMNS: [&str; 12] = [
    "anatomic_stage",
    "cancer_type",
    "smoking",
    "alcohol_history",
    "drugs",
    "sex",
    "race",
    "age",
    "age_level",
    "p16",
    "overall_survival_in_days",
    "current_treatment",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroup {
    pub prefix: String,
    pub columns: Vec<Column>,
}

impl ColumnGroup {
    fn collect(headers: &[String], prefix: &str) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| name.starts_with(prefix))
            .map(|(index, name)| Column {
                name: name.clone(),
                index,
            })
            .collect();
        Self {
            prefix: prefix.to_string(),
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub patient_id: usize,
    pub status: usize,
    pub survival_in_days: usize,
    pub treatment_time: ColumnGroup,
    pub recurrence_time: ColumnGroup,
    pub treatment_type: ColumnGroup,
    pub response: ColumnGroup,
    pub genes: Vec<Column>,
    pub missing_static: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnLayout {
    pub fn discover(headers: &[String], prefixes: &ColumnPrefixes) -> Result<Self> {
        let mut index = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            // First occurrence wins for duplicated headers.
            index.entry(name.clone()).or_insert(i);
        }

        let required = |name: &str| -> Result<usize> {
            index
                .get(name)
                .copied()
                .with_context(|| format!("required column '{}' not found", name))
        };
        let patient_id = required(PATIENT_ID_COLUMN)?;
        let status = required(STATUS_COLUMN)?;
        let survival_in_days = required(SURVIVAL_COLUMN)?;

        let treatment_time = ColumnGroup::collect(headers, &prefixes.treatment_time);
        if treatment_time.is_empty() {
            bail!(
                "no treatment time columns found with prefix '{}'",
                prefixes.treatment_time
            );
        }
        let recurrence_time = ColumnGroup::collect(headers, &prefixes.recurrence_time);
        let treatment_type = ColumnGroup::collect(headers, &prefixes.treatment_type);
        let response = ColumnGroup::collect(headers, &prefixes.response);

        let genes = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| name.starts_with(GENE_PREFIX))
            .map(|(index, name)| Column {
                name: name.clone(),
                index,
            })
            .collect();

        let missing_static = STATIC_COLUMNS
            .iter()
            .filter(|name| !index.contains_key(**name))
            .map(|name| name.to_string())
            .collect();

        Ok(Self {
            patient_id,
            status,
            survival_in_days,
            treatment_time,
            recurrence_time,
            treatment_type,
            response,
            genes,
            missing_static,
            index,
        })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn groups(&self) -> [(&'static str, &ColumnGroup); 4] {
        [
            ("treatment_time", &self.treatment_time),
            ("recurrence_time", &self.recurrence_time),
            ("treatment_type", &self.treatment_type),
            ("response", &self.response),
        ]
    }

    pub fn gene_names(&self) -> Vec<String> {
        self.genes.iter().map(|c| c.name.clone()).collect()
    }
}
