//! NZB Subject Tool
//!
//! Reads NZB manifests and reports, for every file entry, the shape its
//! subject line matched or the raw tokens when no shape is known.

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nzb_subject_core::{NzbFile, NzbReader, NzbReaderConfig, SubjectParserConfig};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Name shown for standard input.
const STDIN_NAME: &str = "-";

/// CLI arguments
#[derive(Parser)]
#[command(name = "nzb-subject")]
#[command(about = "Extract filenames and part counters from NZB subject lines")]
#[command(version)]
struct Cli {
    /// NZB manifests to read; standard input when none are given
    #[arg(env = "NZB_SUBJECT_FILES", value_delimiter = ',')]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, env = "NZB_SUBJECT_FORMAT", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Only report entries whose subject shape is not catalogued
    #[arg(short, long, env = "NZB_SUBJECT_UNMATCHED_ONLY")]
    unmatched_only: bool,

    /// Include separator-run diagnostics
    #[arg(short, long, env = "NZB_SUBJECT_DIAGNOSTICS")]
    diagnostics: bool,

    /// Maximum XML element depth
    #[arg(long, env = "NZB_SUBJECT_MAX_DEPTH", default_value_t = 32)]
    max_depth: usize,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One human-readable line per entry, token dumps for unknown shapes
    Text,
    /// One JSON object per line
    Json,
}

impl Cli {
    fn reader_config(&self) -> NzbReaderConfig {
        NzbReaderConfig::new()
            .with_max_depth(self.max_depth)
            .with_subject(SubjectParserConfig::new().with_diagnostics(self.diagnostics))
    }

    fn wants(&self, file: &NzbFile) -> bool {
        !self.unmatched_only || !file.subject.as_ref().is_some_and(|s| s.is_matched())
    }
}

/// One JSON Lines record.
#[derive(Serialize)]
struct Record<'a> {
    source: &'a str,
    #[serde(flatten)]
    file: &'a NzbFile,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let failures = run(&cli, &mut out)?;
    out.flush()?;

    if failures > 0 {
        error!(failures, "some manifests could not be read");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Processes every source in order. Returns the number of sources that failed.
fn run(cli: &Cli, out: &mut impl Write) -> Result<usize> {
    let config = cli.reader_config();

    if cli.files.is_empty() {
        let stdin = io::stdin();
        return Ok(report(process(cli, STDIN_NAME, stdin.lock(), config, out)));
    }

    let mut failures = 0;
    for path in &cli.files {
        let source = path.display().to_string();
        let result = match NzbReader::from_path(path, config) {
            Ok(reader) => process_reader(cli, &source, reader, out),
            Err(err) => Err(err).with_context(|| format!("failed to open {source}")),
        };
        failures += report(result);
    }
    Ok(failures)
}

fn report(result: Result<()>) -> usize {
    match result {
        Ok(()) => 0,
        Err(err) => {
            error!("{err:#}");
            1
        }
    }
}

fn process(
    cli: &Cli,
    source: &str,
    input: impl BufRead,
    config: NzbReaderConfig,
    out: &mut impl Write,
) -> Result<()> {
    let reader = NzbReader::new(input, config)?;
    process_reader(cli, source, reader, out)
}

fn process_reader<R: BufRead>(
    cli: &Cli,
    source: &str,
    reader: NzbReader<R>,
    out: &mut impl Write,
) -> Result<()> {
    if cli.format == Format::Text {
        writeln!(out, "# {source}")?;
    }

    let mut count = 0usize;
    for file in reader {
        let file = file.with_context(|| format!("failed to read {source}"))?;
        count += 1;
        if !cli.wants(&file) {
            continue;
        }
        match cli.format {
            Format::Text => render_text(&file, out)?,
            Format::Json => {
                serde_json::to_writer(&mut *out, &Record { source, file: &file })?;
                writeln!(out)?;
            }
        }
    }

    info!(source, files = count, "manifest processed");
    Ok(())
}

fn render_text(file: &NzbFile, out: &mut impl Write) -> io::Result<()> {
    let Some(parsed) = &file.subject else {
        return writeln!(out, "no subject");
    };
    writeln!(out, "{parsed}")?;
    for run in &parsed.runs {
        writeln!(
            out,
            "  run {}..{} {:?} {:?}",
            run.start, run.end, run.text, run.transitions
        )?;
    }
    Ok(())
}
