use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_timeline::cli::{Cli, ColumnsArgs, Commands, PrepareArgs, TableArgs};
use kira_timeline::config::TimelineConfig;
use kira_timeline::ctx::Ctx;
use kira_timeline::io;
use kira_timeline::pipeline::Pipeline;
use kira_timeline::pipeline::stage0_scaffold::Stage0Scaffold;
use kira_timeline::pipeline::stage1_input::Stage1Input;
use kira_timeline::pipeline::stage2_extract::Stage2Extract;
use kira_timeline::pipeline::stage3_episodes::Stage3Episodes;
use kira_timeline::pipeline::stage4_outcomes::Stage4Outcomes;
use kira_timeline::pipeline::stage5_output::Stage5Output;
use kira_timeline::pipeline::stage6_clinical::Stage6Clinical;
use kira_timeline::pipeline::stage7_mutations::Stage7Mutations;
use kira_timeline::pipeline::stage8_pfs::Stage8Pfs;
use kira_timeline::pipeline::stage9_prepared_output::Stage9PreparedOutput;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = args.config()?;
            let mut ctx = Ctx::new(
                args.table.input.clone(),
                args.out.clone(),
                config,
                args.json,
                env!("CARGO_PKG_VERSION"),
            );

            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Scaffold::new()),
                Box::new(Stage1Input::new()),
                Box::new(Stage2Extract::new()),
                Box::new(Stage3Episodes::new()),
                Box::new(Stage4Outcomes::new()),
                Box::new(Stage5Output::new()),
            ]);
            pipeline.run(&mut ctx)?;

            print_summary(&ctx);
        }
        Commands::Validate(args) => {
            let mut config = table_config(&args.table)?;
            config.verbosity = args.verbose;
            let mut ctx = Ctx::new(
                args.table.input.clone(),
                PathBuf::from("."),
                config,
                false,
                env!("CARGO_PKG_VERSION"),
            );

            let pipeline = Pipeline::new(vec![
                Box::new(Stage1Input::new()),
                Box::new(Stage2Extract::new()),
                Box::new(Stage3Episodes::new()),
            ]);
            pipeline.run(&mut ctx)?;

            println!("kira-timeline validate ok");
            print_summary(&ctx);
        }
        Commands::Columns(args) => handle_columns(args)?,
        Commands::Prepare(args) => handle_prepare(args)?,
    }

    Ok(())
}

fn table_config(table: &TableArgs) -> Result<TimelineConfig> {
    Ok(TimelineConfig {
        delimiter: table.delimiter_byte()?,
        prefixes: table.prefixes(),
        ..TimelineConfig::default()
    })
}

fn print_summary(ctx: &Ctx) {
    print!("{}", io::summary::format_summary(ctx));
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}

fn handle_columns(args: ColumnsArgs) -> Result<()> {
    let config = table_config(&args.table)?;
    let mut ctx = Ctx::new(
        args.table.input.clone(),
        PathBuf::from("."),
        config,
        false,
        env!("CARGO_PKG_VERSION"),
    );
    let pipeline = Pipeline::new(vec![Box::new(Stage1Input::new())]);
    pipeline.run(&mut ctx)?;

    let layout = ctx.layout.as_ref().context("column layout not resolved")?;
    for (name, group) in layout.groups() {
        let columns: Vec<&str> = group.columns.iter().map(|c| c.name.as_str()).collect();
        println!(
            "{}\t{}\t{}\t{}",
            name,
            group.prefix,
            group.len(),
            columns.join(",")
        );
    }
    println!("genes\t{}\t{}", layout.genes.len(), layout.gene_names().join(","));
    if !layout.missing_static.is_empty() {
        println!("missing_static\t{}", layout.missing_static.join(","));
    }
    Ok(())
}

fn handle_prepare(args: PrepareArgs) -> Result<()> {
    let (config, sources) = args.config()?;
    let mut ctx = Ctx::new(
        args.patients.clone(),
        args.out.clone(),
        config,
        false,
        env!("CARGO_PKG_VERSION"),
    );
    ctx.prepare = Some(sources);

    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage6Clinical::new()),
        Box::new(Stage7Mutations::new()),
        Box::new(Stage8Pfs::new()),
        Box::new(Stage9PreparedOutput::new()),
    ]);
    pipeline.run(&mut ctx)?;

    print!("{}", io::summary::format_prepare_summary(&ctx));
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}
