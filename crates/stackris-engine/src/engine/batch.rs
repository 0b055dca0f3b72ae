use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    GridWidthError, PlacementError,
    core::grid::Grid,
    engine::piece_add::{ParsePieceAddError, PieceAdd},
};

/// An independent sequence of piece additions, simulated on its own grid.
///
/// The text form is a whitespace-separated list of [`PieceAdd`] tokens. An
/// empty line is an empty batch.
///
/// # Example
///
/// ```
/// use stackris_engine::{Batch, Grid};
///
/// let batch: Batch = "Q0 S0 T2".parse()?;
/// assert_eq!(batch.height(Grid::DEFAULT_WIDTH)?, 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch {
    additions: Vec<PieceAdd>,
}

/// Result of simulating a [`Batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    height: usize,
    cleared_lines: usize,
}

impl BatchOutcome {
    /// Grid height after the last addition.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of rows cleared over the whole batch.
    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BatchError {
    #[display("invalid grid width")]
    InvalidWidth(GridWidthError),
    #[display("cannot place piece #{} ({addition})", index + 1)]
    Placement {
        index: usize,
        addition: PieceAdd,
        source: PlacementError,
    },
}

impl FromStr for Batch {
    type Err = ParsePieceAddError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        line.split_whitespace().map(str::parse::<PieceAdd>).collect()
    }
}

impl FromIterator<PieceAdd> for Batch {
    fn from_iter<T: IntoIterator<Item = PieceAdd>>(iter: T) -> Self {
        Self {
            additions: iter.into_iter().collect(),
        }
    }
}

impl Batch {
    #[must_use]
    pub fn new(additions: Vec<PieceAdd>) -> Self {
        Self { additions }
    }

    #[must_use]
    pub fn additions(&self) -> &[PieceAdd] {
        &self.additions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.additions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }

    /// Drops every piece of the batch onto `grid`, in order.
    ///
    /// Returns the total number of rows cleared. Stops at the first
    /// placement that does not fit; earlier additions stay applied.
    pub fn apply(&self, grid: &mut Grid) -> Result<usize, BatchError> {
        let mut cleared_lines = 0;
        for (index, &addition) in self.additions.iter().enumerate() {
            cleared_lines += grid
                .add(addition.kind(), addition.column())
                .map_err(|source| BatchError::Placement {
                    index,
                    addition,
                    source,
                })?;
        }
        Ok(cleared_lines)
    }

    /// Simulates the batch on a fresh grid of the given width.
    pub fn simulate(&self, width: usize) -> Result<BatchOutcome, BatchError> {
        let mut grid = Grid::with_width(width).map_err(BatchError::InvalidWidth)?;
        let cleared_lines = self.apply(&mut grid)?;
        Ok(BatchOutcome {
            height: grid.height(),
            cleared_lines,
        })
    }

    /// Returns the grid height after simulating the batch on a fresh grid.
    pub fn height(&self, width: usize) -> Result<usize, BatchError> {
        Ok(self.simulate(width)?.height())
    }
}
