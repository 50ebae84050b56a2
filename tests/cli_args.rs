use clap::Parser;
use kira_timeline::cli::{Cli, Commands};

#[test]
fn run_defaults() {
    let cli = Cli::parse_from([
        "kira-timeline",
        "run",
        "--input",
        "clinical.csv",
        "--out",
        "out",
    ]);
    match cli.command {
        Commands::Run(args) => {
            let config = args.config().unwrap();
            assert_eq!(config.delimiter, b',');
            assert_eq!(config.sentinel_floor, -5000);
            assert_eq!(config.response_horizon, 180);
            assert_eq!(config.verbosity, 2);
            assert!(!config.drop_censored);
            assert_eq!(config.prefixes.recurrence_time, "reccurence_time");
            assert!(!args.json);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn run_overrides() {
    let cli = Cli::parse_from([
        "kira-timeline",
        "run",
        "--input",
        "clinical.tsv",
        "--out",
        "out",
        "--delimiter",
        "tab",
        "--sentinel-floor",
        "-4000",
        "--response-horizon",
        "90",
        "--recurrence-time-prefix",
        "recurrence_time",
        "--drop-censored",
        "--json",
        "--verbose",
        "0",
    ]);
    match cli.command {
        Commands::Run(args) => {
            let config = args.config().unwrap();
            assert_eq!(config.delimiter, b'\t');
            assert_eq!(config.sentinel_floor, -4000);
            assert_eq!(config.response_horizon, 90);
            assert_eq!(config.prefixes.recurrence_time, "recurrence_time");
            assert_eq!(config.verbosity, 0);
            assert!(config.drop_censored);
            assert!(args.json);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn multi_byte_delimiter_rejected() {
    let cli = Cli::parse_from([
        "kira-timeline",
        "validate",
        "--input",
        "clinical.csv",
        "--delimiter",
        ";;",
    ]);
    match cli.command {
        Commands::Validate(args) => assert!(args.table.delimiter_byte().is_err()),
        _ => panic!("expected validate command"),
    }
}

#[test]
fn prepare_args_split_genes() {
    let cli = Cli::parse_from([
        "kira-timeline",
        "prepare",
        "--patients",
        "patients.csv",
        "--mutations",
        "mutations.maf",
        "--mutations-delimiter",
        "tab",
        "--genes",
        "TP53, NOTCH1,,TP53",
        "--out",
        "out",
    ]);
    match cli.command {
        Commands::Prepare(args) => {
            let (timeline, prepare) = args.config().unwrap();
            assert_eq!(timeline.delimiter, b',');
            assert_eq!(prepare.mutations_delimiter, b'\t');
            assert_eq!(prepare.genes, vec!["TP53".to_string(), "NOTCH1".to_string()]);
            assert!(prepare.pfs.is_none());
        }
        _ => panic!("expected prepare command"),
    }
}
