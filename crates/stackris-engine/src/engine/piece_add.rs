use std::{num::ParseIntError, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::piece::PieceKind;

/// A single piece addition: which piece to drop and at which column.
///
/// The text form is the piece letter followed by the column, e.g. `Q0` or
/// `I3`.
///
/// # Example
///
/// ```
/// use stackris_engine::{PieceAdd, PieceKind};
///
/// let add: PieceAdd = "I3".parse()?;
/// assert_eq!(add.kind(), PieceKind::I);
/// assert_eq!(add.column(), 3);
/// assert_eq!(add.to_string(), "I3");
/// # Ok::<(), stackris_engine::ParsePieceAddError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{kind}{column}")]
pub struct PieceAdd {
    kind: PieceKind,
    column: usize,
}

impl PieceAdd {
    #[must_use]
    pub const fn new(kind: PieceKind, column: usize) -> Self {
        Self { kind, column }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceAddError {
    #[display("empty piece token")]
    Empty,
    #[display("unknown piece {letter:?} in token {token:?}")]
    UnknownPiece { token: String, letter: char },
    #[display("invalid column in token {token:?}")]
    InvalidColumn { token: String, source: ParseIntError },
}

impl FromStr for PieceAdd {
    type Err = ParsePieceAddError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let letter = chars.next().ok_or(ParsePieceAddError::Empty)?;
        let kind =
            PieceKind::from_char(letter).ok_or_else(|| ParsePieceAddError::UnknownPiece {
                token: token.to_owned(),
                letter,
            })?;
        let column = chars
            .as_str()
            .parse::<usize>()
            .map_err(|source| ParsePieceAddError::InvalidColumn {
                token: token.to_owned(),
                source,
            })?;
        Ok(Self { kind, column })
    }
}

impl Serialize for PieceAdd {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceAdd {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Self>().map_err(serde::de::Error::custom)
    }
}
