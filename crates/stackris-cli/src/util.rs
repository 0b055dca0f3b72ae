use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use serde::Serialize;
use stackris_engine::{Batch, BatchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// One grid height per line
    Text,
    /// One JSON object per line
    Json,
}

/// One line of JSON output.
#[derive(Debug, Serialize)]
struct BatchRecord<'a> {
    line: usize,
    additions: &'a Batch,
    height: usize,
    cleared_lines: usize,
}

#[derive(Debug)]
pub(crate) enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub(crate) fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub(crate) fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub(crate) fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub(crate) fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub(crate) fn write_outcome(
        &mut self,
        format: OutputFormat,
        line: usize,
        batch: &Batch,
        outcome: BatchOutcome,
    ) -> anyhow::Result<()> {
        match format {
            OutputFormat::Text => writeln!(self, "{}", outcome.height())
                .with_context(|| format!("Failed to write to {}", self.display_path()))?,
            OutputFormat::Json => {
                let record = BatchRecord {
                    line,
                    additions: batch,
                    height: outcome.height(),
                    cleared_lines: outcome.cleared_lines(),
                };
                serde_json::to_writer(&mut *self, &record)
                    .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
                writeln!(self).with_context(|| {
                    format!(
                        "Failed to write newline after JSON to {}",
                        self.display_path()
                    )
                })?;
            }
        }
        Ok(())
    }

    pub(crate) fn finish(&mut self) -> anyhow::Result<()> {
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}
