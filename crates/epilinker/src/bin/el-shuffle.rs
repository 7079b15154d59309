use std::io::Write;
use log::info;
use colored::*;
use env_logger::Builder;
use clap::Parser;
use clap::ArgAction;
use anyhow::Result;

use epilinker::input_parsers::build_config;
use epilinker::input_parsers::normalize_short_linkers;
use epilinker::input_parsers::EpitopeInputArguments;
use epilinker::input_parsers::LinkerArguments;
use epilinker::input_parsers::OutputArguments;
use epilinker::pipeline::run_pipeline;


#[derive(Debug, Parser)]
#[command(name = "el-shuffle")]
#[command(author, version, about = "Randomized, linked T-cell/B-cell epitope constructs")]
pub struct Cli {
    #[command(flatten)]
    pub input: EpitopeInputArguments,

    #[command(flatten, next_help_heading = "Linkers")]
    pub linkers: LinkerArguments,

    #[command(flatten, next_help_heading = "Output")]
    pub output: OutputArguments,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            // no prefix, just the message
            writeln!(buf, "{}", record.args())
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_short_linkers(std::env::args_os()));
    init_logging(cli.verbose);

    let config = build_config(&cli.input, &cli.linkers, &cli.output)?;
    info!("Writing to {}", config.outdir.display());

    let summary = run_pipeline(&config)?;

    for (path, n) in &summary.files {
        println!("{} {}", format!("{:>4}", n).green(), path.display());
    }

    Ok(())
}

