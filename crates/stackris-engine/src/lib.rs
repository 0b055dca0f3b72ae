pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("grid width must be positive")]
pub struct GridWidthError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("piece {kind} at column {column} does not fit in a grid of width {width}")]
    OutOfBounds {
        kind: PieceKind,
        column: usize,
        width: usize,
    },
    #[display("piece {kind} at column {column} overlaps occupied cells when landing on row {row}")]
    Overlap {
        kind: PieceKind,
        column: usize,
        row: usize,
    },
}
