//! Batch parsing and simulation.
//!
//! - [`PieceAdd`] - One `(piece, column)` addition, written as `Q0`, `I3`, ...
//! - [`Batch`] - A line of additions simulated on its own fresh [`Grid`](crate::Grid)
//! - [`BatchOutcome`] - Final height and cleared row count of a batch
//!
//! # Example
//!
//! ```
//! use stackris_engine::Batch;
//!
//! let batch: Batch = "T2 T5 S0 Z7".parse()?;
//! let outcome = batch.simulate(10)?;
//!
//! assert_eq!(outcome.height(), 1);
//! assert_eq!(outcome.cleared_lines(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{batch::*, piece_add::*};

mod batch;
mod piece_add;
