//! Command-line bounded access-time LZ factorizer.
//!
//! Reads a byte file, builds the annotated suffix tree and streams one
//! phrase per line to stdout, followed by the phrase count. Progress goes
//! to stderr.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use batlz::{Error, Factorizer, SuffixTree};

#[derive(Parser)]
#[command(name = "batlz")]
#[command(about = "Bounded access-time LZ factorization", long_about = None)]
struct Cli {
    /// Input file to factorize (arbitrary bytes, zero bytes not allowed)
    file: PathBuf,

    /// Cost ceiling: how many times a position may be charged as a copy source
    cost: u32,

    /// Search every substring of the input before parsing, as a tree check
    #[arg(long)]
    self_test: bool,

    /// Suppress progress output on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Usage errors exit with status 1 like every other invalid input;
    // --help and --version keep their conventional codes.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };
    if cli.cost == 0 {
        return Err(Error::ZeroCostCeiling.into());
    }

    let input = fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    if !cli.quiet {
        eprintln!("constructing tree over {} bytes...", input.len());
    }
    let tree = SuffixTree::build(&input)
        .with_context(|| format!("cannot index {}", cli.file.display()))?;

    if cli.self_test {
        if !cli.quiet {
            eprintln!("running self-test...");
        }
        anyhow::ensure!(tree.self_test(), "self-test failed: a substring was not found");
    }

    if !cli.quiet {
        eprintln!("n = {}", tree.text_len());
        eprintln!("parsing...");
    }

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);

    let mut factorizer = Factorizer::new(tree, cli.cost)?;
    let mut reported_mb = 0;
    while let Some(phrase) = factorizer.next() {
        let phrase = phrase?;
        writeln!(out, "{phrase}")?;
        if !cli.quiet {
            let mb = factorizer.bytes_consumed() >> 20;
            if mb != reported_mb {
                reported_mb = mb;
                eprintln!("{reported_mb} MB");
            }
        }
    }
    let z = factorizer.phrases_emitted();
    writeln!(out, "z = {z}")?;
    out.flush()?;

    if !cli.quiet {
        eprintln!("{z} phrases");
    }
    Ok(())
}
