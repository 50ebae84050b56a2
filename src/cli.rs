use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    ColumnPrefixes, DEFAULT_RESPONSE_HORIZON, DEFAULT_SENTINEL_FLOOR, PrepareConfig,
    TimelineConfig,
};
use crate::prepare::normalize_genes;

#[derive(Debug, Parser)]
#[command(
    name = "kira-timeline",
    version,
    about = "Reconstruct treatment episodes from clinical timelines for survival analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
    Columns(ColumnsArgs),
    Prepare(PrepareArgs),
}

/// Single-byte delimiter; `tab` and `\t` name a tab.
pub fn parse_delimiter(value: &str) -> anyhow::Result<u8> {
    let delimiter = match value {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match delimiter.as_bytes() {
        [b] => Ok(*b),
        _ => anyhow::bail!("delimiter must be a single byte, got '{}'", value),
    }
}

#[derive(Debug, Clone, Args)]
pub struct TableArgs {
    #[arg(long, help = "Input CSV file (.gz accepted)")]
    pub input: PathBuf,

    #[arg(long, default_value = ",", help = "Single-byte field delimiter of the input")]
    pub delimiter: String,

    #[arg(long, default_value = "treatment_time")]
    pub treatment_time_prefix: String,

    #[arg(long, default_value = "reccurence_time")]
    pub recurrence_time_prefix: String,

    #[arg(long, default_value = "treatment_type")]
    pub treatment_type_prefix: String,

    #[arg(long, default_value = "response_")]
    pub response_prefix: String,
}

impl TableArgs {
    pub fn prefixes(&self) -> ColumnPrefixes {
        ColumnPrefixes {
            treatment_time: self.treatment_time_prefix.clone(),
            recurrence_time: self.recurrence_time_prefix.clone(),
            treatment_type: self.treatment_type_prefix.clone(),
            response: self.response_prefix.clone(),
        }
    }

    pub fn delimiter_byte(&self) -> anyhow::Result<u8> {
        parse_delimiter(&self.delimiter)
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = 2, help = "0 = episodes only, 1 = counts, 2 = itemized")]
    pub verbose: u8,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Also drop episodes without a disease-free time"
    )]
    pub drop_censored: bool,

    #[arg(long, default_value_t = DEFAULT_RESPONSE_HORIZON, help = "Disease-free days for an equivocal response to count")]
    pub response_horizon: i64,

    #[arg(long, default_value_t = DEFAULT_SENTINEL_FLOOR, allow_negative_numbers = true)]
    pub sentinel_floor: i64,
}

impl RunArgs {
    pub fn config(&self) -> anyhow::Result<TimelineConfig> {
        Ok(TimelineConfig {
            delimiter: self.table.delimiter_byte()?,
            prefixes: self.table.prefixes(),
            sentinel_floor: self.sentinel_floor,
            response_horizon: self.response_horizon,
            verbosity: self.verbose,
            drop_censored: self.drop_censored,
        })
    }
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[arg(long, default_value_t = 2)]
    pub verbose: u8,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Debug, Args)]
pub struct PrepareArgs {
    #[arg(long, help = "Clinical patient table keyed by bcr_patient_barcode")]
    pub patients: PathBuf,

    #[arg(long, default_value = ",")]
    pub delimiter: String,

    #[arg(long, help = "Mutation table with Tumor_Sample_Barcode and Hugo_Symbol")]
    pub mutations: PathBuf,

    #[arg(long, default_value = ",")]
    pub mutations_delimiter: String,

    #[arg(long, help = "Optional progression-free survival table (PFI.time.1, PFI.1)")]
    pub pfs: Option<PathBuf>,

    #[arg(long, default_value = ",")]
    pub pfs_delimiter: String,

    #[arg(long, value_delimiter = ',', help = "Gene symbols to flag, comma separated")]
    pub genes: Vec<String>,

    #[arg(long)]
    pub out: PathBuf,
}

impl PrepareArgs {
    pub fn config(&self) -> anyhow::Result<(TimelineConfig, PrepareConfig)> {
        let timeline = TimelineConfig {
            delimiter: parse_delimiter(&self.delimiter)?,
            ..TimelineConfig::default()
        };
        let prepare = PrepareConfig {
            mutations: self.mutations.clone(),
            mutations_delimiter: parse_delimiter(&self.mutations_delimiter)?,
            pfs: self.pfs.clone(),
            pfs_delimiter: parse_delimiter(&self.pfs_delimiter)?,
            genes: normalize_genes(&self.genes),
        };
        Ok((timeline, prepare))
    }
}
