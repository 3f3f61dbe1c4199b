//! unlzw CLI - command-line `.Z` decompressor
//!
//! Mirrors the historical `uncompress` surface: with no file argument it
//! filters stdin to stdout; given a `FILE.Z` it writes `FILE` and removes
//! the input unless told otherwise.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::lzw;

#[derive(Parser)]
#[command(name = "unlzw")]
#[command(version = crate::VERSION)]
#[command(about = "Decompress .Z (compress/LZW) streams", long_about = None)]
struct Cli {
    /// Compressed input file; omit or pass "-" to filter stdin to stdout
    file: Option<PathBuf>,

    /// Write to stdout and keep the input file
    #[arg(short = 'c', long = "stdout", conflicts_with = "output")]
    stdout: bool,

    /// Explicit output path (default: input path minus its .Z suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    force: bool,

    /// Keep the input file (default removes it after a successful
    /// file-to-file decompress)
    #[arg(short, long)]
    keep: bool,

    /// Enable debug-level log output
    #[arg(short, long)]
    verbose: bool,
}

/// Run the unlzw CLI.
///
/// # Errors
/// Returns an error if the stream is invalid or any I/O fails; the
/// binary maps decode errors to the historical exit codes.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    match &cli.file {
        None => decompress_stdio(),
        Some(path) if path.as_os_str() == "-" => decompress_stdio(),
        Some(path) => decompress_file(&cli, path),
    }
}

fn decompress_stdio() -> anyhow::Result<()> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    lzw::decompress(stdin, stdout)?;
    Ok(())
}

fn decompress_file(cli: &Cli, input: &Path) -> anyhow::Result<()> {
    let source = File::open(input)
        .with_context(|| format!("cannot open {}", input.display()))?;
    let reader = BufReader::new(source);

    if cli.stdout {
        lzw::decompress(reader, io::stdout().lock())?;
        return Ok(());
    }

    let target = match &cli.output {
        Some(path) => path.clone(),
        None => output_path_for(input).with_context(|| {
            format!(
                "{}: unknown suffix, use -o or -c to pick an output",
                input.display()
            )
        })?,
    };

    if target.exists() && !cli.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", target.display());
    }

    let sink = File::create(&target)
        .with_context(|| format!("cannot create {}", target.display()))?;

    match lzw::decompress(reader, BufWriter::new(sink)) {
        Ok(written) => {
            tracing::debug!("{} -> {} ({written} bytes)", input.display(), target.display());
            if !cli.keep {
                fs::remove_file(input)
                    .with_context(|| format!("cannot remove {}", input.display()))?;
            }
            Ok(())
        }
        Err(e) => {
            // Don't leave a partial output file behind
            let _ = fs::remove_file(&target);
            Err(e.into())
        }
    }
}

/// Derive the decompressed filename from the input name:
/// `foo.Z` -> `foo`, `foo.taz` -> `foo.tar`. Returns `None` when the
/// suffix is unrecognized rather than guessing.
fn output_path_for(input: &Path) -> Option<PathBuf> {
    let name = input.file_name()?.to_str()?;
    let stripped = if let Some(stem) = name.strip_suffix(".Z") {
        stem.to_string()
    } else if let Some(stem) = name.strip_suffix(".taz") {
        format!("{stem}.tar")
    } else {
        return None;
    };
    if stripped.is_empty() {
        return None;
    }
    Some(input.with_file_name(stripped))
}
