use std::env;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use colored::*;
use log::info;
use rand::Rng;
use rand::rngs::ThreadRng;

use el_epitopes::Draw;
use el_epitopes::EpitopeSet;
use el_epitopes::Linker;
use el_epitopes::Randomizer;
use el_epitopes::fuse;
use el_fasta::FastaRecord;
use el_fasta::FastaWriter;
use el_fasta::RecordGroups;
use el_fasta::create_output_dir;

pub const FUSION_FILE: &str = "btcell_epitopes.fa";

/// Everything one run needs, built once from the command line.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub tcell: PathBuf,
    pub bcell: PathBuf,
    pub randomsize: usize,
    pub seed: Option<u64>,
    pub tcell_linker: Linker,
    pub bcell_linker: Linker,
    pub outdir: PathBuf,
}

/// Files written by one run and their record counts.
#[derive(Debug, Default)]
pub struct PipelineSummary {
    pub files: Vec<(PathBuf, usize)>,
}

/// `<exe dir>/../output`: the binary is expected at `<prefix>/bin/`, or at
/// `target/<profile>/` when run from a cargo build.
pub fn default_output_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Cannot locate the running executable")?;
    let base = exe.parent()
        .and_then(Path::parent)
        .ok_or_else(|| anyhow!("Cannot derive an output directory from {}", exe.display()))?;
    Ok(base.join("output"))
}

pub fn raw_output_path(outdir: &Path, group: &str) -> PathBuf {
    outdir.join(format!("{}_raw_shuffled_epitopes.fa", group))
}

pub fn linked_output_path(outdir: &Path, group: &str) -> PathBuf {
    outdir.join(format!("{}_linked_shuffled_epitopes.fa", group))
}

/// Load, randomize, link and write. Files are written one after the
/// other; an error aborts the run but keeps what was written so far.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary> {
    match config.seed {
        Some(seed) => run_with(config, &mut Randomizer::from_seed(seed)),
        None => run_with(config, &mut Randomizer::<ThreadRng>::default()),
    }
}

pub fn run_with<R: Rng>(
    config: &PipelineConfig,
    randomizer: &mut Randomizer<R>,
) -> Result<PipelineSummary> {
    let mut tcell = EpitopeSet::from_file(&config.tcell)
        .with_context(|| format!("Failed to read T-cell epitopes from {}", config.tcell.display()))?;
    let mut bcell = EpitopeSet::from_file(&config.bcell)
        .with_context(|| format!("Failed to read B-cell epitopes from {}", config.bcell.display()))?;
    info!("T-cell: {} epitopes of length {}", tcell.len(), tcell.epi_len());
    info!("B-cell: {} epitopes of length {}", bcell.len(), bcell.epi_len());
    if tcell.name() == bcell.name() {
        bail!("T-cell ({}) and B-cell ({}) tables share the name '{}', \
            their output files would overwrite each other",
            config.tcell.display(), config.bcell.display(), tcell.name());
    }

    let (tcell_draws, bcell_draws) = randomizer.draw_pair(&mut tcell, &mut bcell, config.randomsize);

    create_output_dir(&config.outdir)?;
    let mut summary = PipelineSummary::default();

    let tcell_linked = write_group(
        &mut summary, &config.outdir, tcell.name(), tcell.epi_len(),
        &tcell_draws, &config.tcell_linker)?;
    let bcell_linked = write_group(
        &mut summary, &config.outdir, bcell.name(), bcell.epi_len(),
        &bcell_draws, &config.bcell_linker)?;

    let fusions = fuse_records(&bcell_linked, &config.tcell_linker, &tcell_linked);
    let path = config.outdir.join(FUSION_FILE);
    let n = write_with_progress(&path, &fusions)?;
    summary.files.push((path, n));

    Ok(summary)
}

/// Writes the raw and the linked file of one group, returns the linked
/// sequences in record order.
fn write_group(
    summary: &mut PipelineSummary,
    outdir: &Path,
    group: &str,
    epi_len: usize,
    draws: &[Draw],
    linker: &Linker,
) -> Result<Vec<String>> {
    let groups: RecordGroups = draws.iter()
        .map(|d| (d.raw(), d.header()))
        .collect();
    if groups.len() < draws.len() {
        info!("{}: {} of {} draws are repeats and were merged.",
            group, draws.len() - groups.len(), draws.len());
    }

    let raw = groups.records();
    let linked = groups.records_with(|seq| linker.link(seq, epi_len));

    let raw_path = raw_output_path(outdir, group);
    let linked_path = linked_output_path(outdir, group);
    let mut raw_writer = FastaWriter::create(&raw_path)?;
    let mut linked_writer = FastaWriter::create(&linked_path)?;
    let raw_name = raw_writer.file_name();
    let linked_name = linked_writer.file_name();

    // One progress line per record and file, raw first.
    for (r, l) in raw.iter().zip(&linked) {
        println!("writing {} epitopes to {}", r.header().yellow(), raw_name.cyan());
        raw_writer.write_record(r)?;
        println!("\nwriting {} epitopes to {}", l.header().yellow(), linked_name.cyan());
        linked_writer.write_record(l)?;
    }
    summary.files.push((raw_path, raw_writer.finish()?));
    summary.files.push((linked_path, linked_writer.finish()?));

    Ok(linked.into_iter().map(|r| r.sequence().to_string()).collect())
}

/// Pairs the i-th B-cell record with the i-th T-cell record; stops at the
/// shorter of the two lists. Headers are the 1-based pair index.
pub fn fuse_records(
    bcell_linked: &[String],
    tcell_linker: &Linker,
    tcell_linked: &[String],
) -> Vec<FastaRecord> {
    bcell_linked.iter()
        .zip(tcell_linked)
        .enumerate()
        .map(|(i, (b, t))| FastaRecord::new(format!(">{}", i + 1), fuse(b, tcell_linker, t)))
        .collect()
}

fn write_with_progress(path: &Path, records: &[FastaRecord]) -> Result<usize> {
    let mut writer = FastaWriter::create(path)?;
    let name = writer.file_name();
    for record in records {
        println!("writing {} epitopes to {}", record.header().yellow(), name.cyan());
        writer.write_record(record)?;
    }
    Ok(writer.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_table(dir: &Path, name: &str, epitopes: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut text = String::from("id,epitope\n");
        for (i, e) in epitopes.iter().enumerate() {
            text.push_str(&format!("{},{}\n", i + 1, e));
        }
        fs::write(&path, text).unwrap();
        path
    }

    fn config(dir: &Path, randomsize: usize) -> PipelineConfig {
        PipelineConfig {
            tcell: write_table(dir, "tcell.csv", &["AAA", "BBB", "CCC"]),
            bcell: write_table(dir, "bcell.csv", &["DD", "EE"]),
            randomsize,
            seed: Some(5),
            tcell_linker: Linker::new("aay"),
            bcell_linker: Linker::new("gpgpg"),
            outdir: dir.join("output"),
        }
    }

    fn sequences(text: &str) -> Vec<&str> {
        text.lines().filter(|l| !l.starts_with('>')).collect()
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), 2);
        let summary = run_pipeline(&config).unwrap();
        assert_eq!(summary.files.len(), 5);

        let out = dir.path().join("output");
        for name in [
            "tcell_raw_shuffled_epitopes.fa",
            "tcell_linked_shuffled_epitopes.fa",
            "bcell_raw_shuffled_epitopes.fa",
            "bcell_linked_shuffled_epitopes.fa",
            FUSION_FILE,
        ] {
            assert!(out.join(name).is_file(), "missing {}", name);
        }

        let traw = fs::read_to_string(out.join("tcell_raw_shuffled_epitopes.fa")).unwrap();
        assert!(traw.starts_with(">tcell_3_1"));
        for seq in sequences(&traw) {
            assert_eq!(seq.len(), 9);
        }

        let tlinked = fs::read_to_string(out.join("tcell_linked_shuffled_epitopes.fa")).unwrap();
        for seq in sequences(&tlinked) {
            let mut parts: Vec<&str> = seq.split("AAY").collect();
            parts.sort_unstable();
            assert_eq!(parts, vec!["AAA", "BBB", "CCC"]);
        }

        let blinked = fs::read_to_string(out.join("bcell_linked_shuffled_epitopes.fa")).unwrap();
        for seq in sequences(&blinked) {
            assert!(seq == "DDGPGPGEE" || seq == "EEGPGPGDD");
        }

        let fused = fs::read_to_string(out.join(FUSION_FILE)).unwrap();
        assert!(fused.starts_with(">1\n"));
        let bodies: String = sequences(&fused).concat();
        assert!(bodies.starts_with("AKFVAAWTLKAAAEAAAK"));
    }

    #[test]
    fn test_pipeline_zero_draws() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), 0);
        let summary = run_pipeline(&config).unwrap();
        assert_eq!(summary.files.len(), 5);
        for (path, n) in &summary.files {
            assert_eq!(*n, 0);
            assert_eq!(fs::read_to_string(path).unwrap(), "");
        }
    }

    #[test]
    fn test_pipeline_empty_table_fails() {
        let dir = tempdir().unwrap();
        let mut config = config(dir.path(), 2);
        config.bcell = write_table(dir.path(), "bcell.csv", &[]);
        let err = run_pipeline(&config).unwrap_err();
        assert!(err.to_string().contains("B-cell"));
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_repeated_draws_are_merged() {
        // A single epitope has only one ordering.
        let dir = tempdir().unwrap();
        let mut config = config(dir.path(), 3);
        config.tcell = write_table(dir.path(), "single.csv", &["KLM"]);
        run_pipeline(&config).unwrap();
        let text = fs::read_to_string(
            dir.path().join("output").join("single_raw_shuffled_epitopes.fa")).unwrap();
        assert_eq!(text, ">single_3_1>single_3_2>single_3_3\nKLM\n");
    }

    #[test]
    fn test_shared_table_name_fails() {
        let dir = tempdir().unwrap();
        let tdir = dir.path().join("t");
        let bdir = dir.path().join("b");
        fs::create_dir_all(&tdir).unwrap();
        fs::create_dir_all(&bdir).unwrap();

        let mut config = config(dir.path(), 2);
        config.seed = Some(1);
        config.tcell = write_table(&tdir, "epitopes.csv", &["AAA", "BBB", "CCC"]);
        config.bcell = write_table(&bdir, "epitopes.csv", &["DD", "EE"]);

        let err = run_pipeline(&config).unwrap_err();
        assert!(err.to_string().contains("'epitopes'"));
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_raw_and_linked_files_match() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), 6);
        let summary = run_pipeline(&config).unwrap();
        let counts: Vec<usize> = summary.files.iter().map(|(_, n)| *n).collect();
        assert_eq!(counts[0], counts[1]);
        assert_eq!(counts[2], counts[3]);
        assert_eq!(counts[4], counts[0].min(counts[2]));

        let out = dir.path().join("output");
        let raw = fs::read_to_string(out.join("tcell_raw_shuffled_epitopes.fa")).unwrap();
        let linked = fs::read_to_string(out.join("tcell_linked_shuffled_epitopes.fa")).unwrap();
        let headers = |text: &str| -> Vec<String> {
            text.lines().filter(|l| l.starts_with('>')).map(String::from).collect()
        };
        assert_eq!(headers(&raw), headers(&linked));
    }

    #[test]
    fn test_fuse_records_stops_at_shorter() {
        let linker = Linker::new("AAY");
        let b = vec!["DDGPGPGEE".to_string(), "EEGPGPGDD".to_string()];
        let t = vec!["AAAAAYBBB".to_string()];
        let records = fuse_records(&b, &linker, &t);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header(), ">1");
        assert_eq!(records[0].sequence(), "AKFVAAWTLKAAAEAAAKDDGPGPGEEAAYAAAAAYBBB");
    }

    #[test]
    fn test_output_paths() {
        let out = Path::new("output");
        assert_eq!(raw_output_path(out, "tcell"), out.join("tcell_raw_shuffled_epitopes.fa"));
        assert_eq!(linked_output_path(out, "bcell"), out.join("bcell_linked_shuffled_epitopes.fa"));
    }
}

