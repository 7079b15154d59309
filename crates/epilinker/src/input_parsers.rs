use std::ffi::OsString;
use std::path::PathBuf;

use clap::Args;
use anyhow::Result;
use log::debug;
use log::warn;

use el_epitopes::Linker;
use el_epitopes::DEFAULT_TCELL_LINKER;
use el_epitopes::DEFAULT_BCELL_LINKER;

use crate::pipeline::PipelineConfig;
use crate::pipeline::default_output_dir;

/// The two epitope tables and how many shuffles to draw from each.
#[derive(Debug, Args)]
pub struct EpitopeInputArguments {
    /// T-cell epitope table (CSV, epitopes in the second column)
    #[arg(short, long, value_name = "FILE")]
    pub tcell: PathBuf,

    /// B-cell epitope table (CSV, epitopes in the second column)
    #[arg(short, long, value_name = "FILE")]
    pub bcell: PathBuf,

    /// Number of randomized epitope orderings per group
    #[arg(short, long, default_value_t = 10)]
    pub randomsize: usize,

    /// Seed for reproducible shuffles
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Linker peptides, uppercased before use.
#[derive(Debug, Args)]
pub struct LinkerArguments {
    /// T-cell epitope linker (also accepted as -tcl)
    #[arg(long, default_value = DEFAULT_TCELL_LINKER)]
    pub tclinker: String,

    /// B-cell epitope linker (also accepted as -bcl)
    #[arg(long, default_value = DEFAULT_BCELL_LINKER)]
    pub bclinker: String,
}

#[derive(Debug, Args)]
pub struct OutputArguments {
    /// Output directory [default: <install prefix>/output]
    #[arg(short, long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,
}

impl LinkerArguments {
    pub fn tcell_linker(&self) -> Linker {
        Linker::new(&self.tclinker)
    }

    pub fn bcell_linker(&self) -> Linker {
        Linker::new(&self.bclinker)
    }
}

impl OutputArguments {
    pub fn resolve(&self) -> Result<PathBuf> {
        match &self.outdir {
            Some(dir) => Ok(dir.clone()),
            None => default_output_dir(),
        }
    }
}

/// Collects all argument groups into the configuration of one run.
pub fn build_config(
    input: &EpitopeInputArguments,
    linkers: &LinkerArguments,
    output: &OutputArguments,
) -> Result<PipelineConfig> {
    let tcell_linker = linkers.tcell_linker();
    let bcell_linker = linkers.bcell_linker();
    if tcell_linker.is_empty() || bcell_linker.is_empty() {
        warn!("Empty linker: epitopes will be concatenated directly.");
    }

    let config = PipelineConfig {
        tcell: input.tcell.clone(),
        bcell: input.bcell.clone(),
        randomsize: input.randomsize,
        seed: input.seed,
        tcell_linker,
        bcell_linker,
        outdir: output.resolve()?,
    };
    debug!("{:?}", config);
    Ok(config)
}

/// Rewrites the multi-letter short options `-tcl` and `-bcl` (also in
/// their `-tcl=VALUE` form) to `--tclinker` and `--bclinker`.
pub fn normalize_short_linkers<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter().map(|arg| {
        let Some(s) = arg.to_str() else {
            return arg;
        };
        for (short, long) in [("-tcl", "--tclinker"), ("-bcl", "--bclinker")] {
            if s == short {
                return OsString::from(long);
            }
            if let Some(value) = s.strip_prefix(short).and_then(|v| v.strip_prefix('=')) {
                return OsString::from(format!("{}={}", long, value));
            }
        }
        arg
    }).collect()
}
