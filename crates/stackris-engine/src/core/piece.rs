use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Number of occupied cells in every piece.
pub const PIECE_CELLS: usize = 4;

/// Occupancy layout of a piece.
///
/// Rows are stored bottom first, each row holding one cell per column
/// (`1` for occupied, `0` for empty). All rows have the same width.
///
/// # Example
///
/// ```
/// use stackris_engine::PieceKind;
///
/// let shape = PieceKind::T.shape();
/// assert_eq!(shape.height(), 2);
/// assert_eq!(shape.width(), 3);
/// assert_eq!(shape.rows()[0], [1, 1, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    rows: &'static [&'static [u8]],
}

impl PieceShape {
    const fn new(rows: &'static [&'static [u8]]) -> Self {
        assert!(!rows.is_empty());
        let width = rows[0].len();
        let mut occupied = 0;
        let mut y = 0;
        while y < rows.len() {
            assert!(rows[y].len() == width);
            let mut x = 0;
            while x < width {
                assert!(rows[y][x] <= 1);
                occupied += rows[y][x] as usize;
                x += 1;
            }
            y += 1;
        }
        assert!(occupied == PIECE_CELLS);
        Self { rows }
    }

    /// Rows of the layout, bottom row first.
    #[must_use]
    pub const fn rows(&self) -> &'static [&'static [u8]] {
        self.rows
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Returns the `(dx, dy)` offsets of occupied cells, with `dy` counted
    /// upward from the bottom row.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(usize, usize), PIECE_CELLS> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(dy, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &cell)| cell != 0)
                    .map(move |(dx, _)| (dx, dy))
            })
            .collect()
    }
}

/// Enum representing the type of piece.
///
/// Pieces are identified by their letter (`Q` is the square).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Deserialize, Serialize,
)]
#[repr(u8)]
pub enum PieceKind {
    /// Square piece.
    Q = 0,
    /// Z-piece.
    Z = 1,
    /// S-piece.
    S = 2,
    /// T-piece.
    T = 3,
    /// Horizontal bar, four cells wide.
    I = 4,
    /// L-piece.
    L = 5,
    /// J-piece.
    J = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in declaration order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::Q,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
    ];

    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.shape().height()
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.shape().width()
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::Q.as_char(), 'Q');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::Q => 'Q',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('O'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'Q' => Some(PieceKind::Q),
            'Z' => Some(PieceKind::Z),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'I' => Some(PieceKind::I),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = [
    // Q-piece
    PieceShape::new(&[&[1, 1], &[1, 1]]),
    // Z-piece
    PieceShape::new(&[&[0, 1, 1], &[1, 1, 0]]),
    // S-piece
    PieceShape::new(&[&[1, 1, 0], &[0, 1, 1]]),
    // T-piece
    PieceShape::new(&[&[1, 1, 1], &[0, 1, 0]]),
    // I-piece
    PieceShape::new(&[&[1, 1, 1, 1]]),
    // L-piece
    PieceShape::new(&[&[1, 1], &[1, 0], &[1, 0]]),
    // J-piece
    PieceShape::new(&[&[1, 1], &[0, 1], &[0, 1]]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_well_defined() {
        for kind in PieceKind::ALL {
            let occupied: usize = kind
                .shape()
                .rows()
                .iter()
                .flat_map(|row| row.iter())
                .map(|&cell| usize::from(cell))
                .sum();
            assert_eq!(occupied, PIECE_CELLS, "{kind} should occupy 4 cells");
            assert_eq!(kind.shape().occupied_cells().len(), PIECE_CELLS);
        }
    }

    #[test]
    fn test_piece_layouts_unique() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(a.shape(), b.shape(), "{a} and {b} share a layout");
            }
        }
    }

    #[test]
    fn test_piece_dimensions() {
        let dims = [
            (PieceKind::Q, 2, 2),
            (PieceKind::Z, 2, 3),
            (PieceKind::S, 2, 3),
            (PieceKind::T, 2, 3),
            (PieceKind::I, 1, 4),
            (PieceKind::L, 3, 2),
            (PieceKind::J, 3, 2),
        ];
        for (kind, height, width) in dims {
            assert_eq!(kind.height(), height, "height of {kind}");
            assert_eq!(kind.width(), width, "width of {kind}");
        }
    }

    #[test]
    fn test_occupied_cells_bottom_first() {
        let cells = PieceKind::L.shape().occupied_cells();
        assert_eq!(cells.as_slice(), &[(0, 0), (1, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(kind.to_string(), kind.as_char().to_string());
        }
        assert_eq!(PieceKind::from_char('O'), None);
        assert_eq!(PieceKind::from_char('q'), None);
    }

    #[test]
    fn test_piece_kind_serialization() {
        let serialized = serde_json::to_string(&PieceKind::J).unwrap();
        assert_eq!(serialized, "\"J\"");
        let deserialized: PieceKind = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, PieceKind::J);
        assert!(serde_json::from_str::<PieceKind>("\"O\"").is_err());
    }
}
