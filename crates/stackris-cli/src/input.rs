use std::{
    fs::File,
    io::{self, BufRead, BufReader, IsTerminal as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use stackris_engine::Batch;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("no input provided: pass piece additions as arguments, a file path, or pipe them on stdin")]
pub(crate) struct NoInputError;

/// Where batches are read from. Every line is an independent batch.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub(crate) enum InputSource {
    #[display("command line arguments")]
    Args(Vec<String>),
    #[display("{}", _0.display())]
    File(PathBuf),
    #[display("stdin")]
    Stdin,
}

impl InputSource {
    /// Picks the input source the way the command line documents it:
    /// a single existing file path, otherwise the arguments themselves,
    /// otherwise piped stdin.
    pub(crate) fn detect(inputs: Vec<String>) -> anyhow::Result<Self> {
        Self::detect_with_stdin(inputs, !io::stdin().is_terminal())
    }

    fn detect_with_stdin(inputs: Vec<String>, stdin_piped: bool) -> anyhow::Result<Self> {
        let file = match inputs.as_slice() {
            [path] if Path::new(path).is_file() => Some(PathBuf::from(path)),
            _ => None,
        };
        if let Some(path) = file {
            return Ok(Self::File(path));
        }
        if inputs.is_empty() {
            if stdin_piped {
                return Ok(Self::Stdin);
            }
            return Err(NoInputError.into());
        }
        Ok(Self::Args(inputs))
    }

    /// Parses each line of the source and passes it to `handle` along with
    /// its 1-based line number.
    pub(crate) fn read_batches<F>(&self, mut handle: F) -> anyhow::Result<()>
    where
        F: FnMut(usize, Batch) -> anyhow::Result<()>,
    {
        match self {
            Self::Args(args) => {
                for (index, arg) in args.iter().enumerate() {
                    let line = index + 1;
                    handle(line, self.parse_line(line, arg)?)?;
                }
                Ok(())
            }
            Self::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                self.read_lines(BufReader::new(file), handle)
            }
            Self::Stdin => self.read_lines(io::stdin().lock(), handle),
        }
    }

    fn read_lines<R, F>(&self, reader: R, mut handle: F) -> anyhow::Result<()>
    where
        R: BufRead,
        F: FnMut(usize, Batch) -> anyhow::Result<()>,
    {
        for (index, text) in reader.lines().enumerate() {
            let line = index + 1;
            let text = text.with_context(|| format!("Failed to read line {line} of {self}"))?;
            handle(line, self.parse_line(line, &text)?)?;
        }
        Ok(())
    }

    fn parse_line(&self, line: usize, text: &str) -> anyhow::Result<Batch> {
        text.parse::<Batch>()
            .with_context(|| format!("Failed to parse line {line} of {self}"))
    }
}
