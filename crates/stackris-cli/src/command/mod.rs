use std::{io, num::NonZeroUsize, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    input::InputSource,
    util::{Output, OutputFormat},
};

/// Drops Tetris pieces onto a grid and prints the resulting height of each line.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Lines of piece additions (e.g. "I0 I1 I2"), or a single input file path.
    /// Reads from stdin when omitted.
    inputs: Vec<String>,
    /// Width of the grid
    #[arg(long, env = "STACKRIS_WIDTH", default_value = "10")]
    width: NonZeroUsize,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Enable debug logging (overridden by `RUST_LOG`)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs {
        inputs,
        width,
        format,
        output,
        verbose,
    } = CommandArgs::parse();
    init_logging(verbose);

    let source = InputSource::detect(inputs)?;
    let width = width.get();
    tracing::debug!(%source, width, ?format, "simulating batches");

    let mut output = Output::from_output_path(output)?;
    let mut num_batches = 0;
    source.read_batches(|line, batch| {
        let outcome = batch
            .simulate(width)
            .with_context(|| format!("Failed to simulate line {line} of {source}"))?;
        tracing::debug!(
            line,
            pieces = batch.len(),
            height = outcome.height(),
            cleared_lines = outcome.cleared_lines(),
            "batch simulated"
        );
        num_batches += 1;
        output.write_outcome(format, line, &batch, outcome)
    })?;
    output.finish()?;

    tracing::debug!(num_batches, output = %output.display_path(), "done");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_args() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let args =
            CommandArgs::try_parse_from(["stackris", "--width", "6", "I0 I1", "Q0"]).unwrap();
        assert_eq!(args.inputs, ["I0 I1", "Q0"]);
        assert_eq!(args.width.get(), 6);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.verbose);

        assert!(CommandArgs::try_parse_from(["stackris", "--width", "0"]).is_err());
        assert!(CommandArgs::try_parse_from(["stackris", "--format", "xml"]).is_err());
    }
}
