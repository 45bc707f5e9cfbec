//! The `doublex pairs` command: print a pairing without touching any pixels.

use clap::Args;
use doublex_core::config::expand_path;
use doublex_core::{Config, DoubleX, OutputWriter, PlannedComposite};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::compose::{accept_pairing, PlanFormat};

/// Arguments for the `pairs` command.
#[derive(Args, Debug)]
pub struct PairsArgs {
    /// First source directory
    #[arg(required = true)]
    pub dir1: PathBuf,

    /// Second source directory (omit to split DIR1 into two random halves)
    #[arg(short, long = "with", value_name = "DIR2")]
    pub with: Option<PathBuf>,

    /// Output directory to prefix planned file names with
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for a reproducible pairing
    #[arg(long)]
    pub seed: Option<u64>,

    /// Plan format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: PlanFormat,
}

/// Execute the pairs command.
pub async fn execute(args: PairsArgs, config: &Config) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_plan(&args, config, BufWriter::new(stdout.lock()))
}

fn write_plan<W: Write>(args: &PairsArgs, config: &Config, out: W) -> anyhow::Result<()> {
    let dir1 = expand_path(&args.dir1.to_string_lossy());
    let dir2 = args
        .with
        .as_ref()
        .map(|p| expand_path(&p.to_string_lossy()))
        .filter(|p| !p.as_os_str().is_empty());
    let output = args.output.as_ref().map(|p| expand_path(&p.to_string_lossy()));

    let planned = DoubleX::new(config.clone()).pair_sources(&dir1, dir2.as_deref(), args.seed);
    let Some(pairing) = accept_pairing(planned, config)? else {
        return Ok(());
    };

    let plan: Vec<PlannedComposite> = pairing
        .pairs
        .iter()
        .map(|pair| PlannedComposite::new(pair, output.as_deref()))
        .collect();

    let mut writer = OutputWriter::new(out, args.format.into(), true);
    writer.write_all(&plan)?;
    writer.flush()?;

    tracing::info!(
        "{} pair(s) planned, {} image(s) left unpaired",
        writer.items_written(),
        pairing.dropped
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(dir1: &std::path::Path) -> PairsArgs {
        PairsArgs {
            dir1: dir1.to_path_buf(),
            with: None,
            output: Some(PathBuf::from("/out")),
            seed: Some(5),
            format: PlanFormat::Jsonl,
        }
    }

    #[test]
    fn plan_lists_one_line_per_pair() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.jpg", "c.jpg", "d.jpg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let mut buffer = Vec::new();
        write_plan(&args(dir.path()), &Config::default(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("/out/"));
    }

    #[test]
    fn empty_directory_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = Vec::new();
        write_plan(&args(dir.path()), &Config::default(), &mut buffer).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn missing_second_directory_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let mut pairs_args = args(dir.path());
        pairs_args.with = Some(dir.path().join("gone"));

        let err = write_plan(&pairs_args, &Config::default(), Vec::new()).unwrap_err();
        assert!(err
            .to_string()
            .contains("Second source directory does not exist"));
    }
}
