use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// One of the 64 board positions, `a1 = 0` through `h8 = 63`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    pub const COUNT: u8 = 64;

    pub const fn new(id: u8) -> Option<Self> {
        if id < Self::COUNT { Some(Self(id)) } else { None }
    }

    pub const fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    pub const fn id(self) -> u8 {
        self.0
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Applies a file/rank displacement, `None` when it leaves the board.
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        let file = self.file().checked_add_signed(files)?;
        let rank = self.rank().checked_add_signed(ranks)?;
        Self::from_coords(file, rank)
    }
}

impl TryFrom<u8> for Square {
    type Error = BoardError;

    fn try_from(id: u8) -> Result<Self> {
        Self::new(id).ok_or(BoardError::InvalidSquare(id))
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> u8 {
        square.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file()),
            char::from(b'1' + self.rank())
        )
    }
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Ok(Self((rank - b'1') * 8 + (file - b'a')))
            }
            _ => Err(BoardError::InvalidNotation),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const fn prefix(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const fn letter(self) -> char {
        use PieceKind::*;
        match self {
            Pawn => 'p',
            Knight => 'n',
            Bishop => 'b',
            Rook => 'r',
            Queen => 'q',
            King => 'k',
        }
    }

    const fn from_letter(letter: char) -> Option<Self> {
        use PieceKind::*;
        Some(match letter {
            'p' => Pawn,
            'n' => Knight,
            'b' => Bishop,
            'r' => Rook,
            'q' => Queen,
            'k' => King,
            _ => return None,
        })
    }
}

/// Piece identity as carried by a single case-coded symbol: uppercase is
/// white, lowercase is black.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    pub fn from_symbol(symbol: char) -> Result<Self> {
        let side = if symbol.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        PieceKind::from_letter(symbol.to_ascii_lowercase())
            .map(|kind| Self { side, kind })
            .ok_or(BoardError::InvalidPiece(symbol))
    }

    pub const fn symbol(self) -> char {
        let letter = self.kind.letter();
        match self.side {
            Side::White => letter.to_ascii_uppercase(),
            Side::Black => letter,
        }
    }
}

/// A candidate move awaiting submission. Origin and destination always differ.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveIntent {
    from: Square,
    to: Square,
}

impl MoveIntent {
    pub fn new(from: Square, to: Square) -> Option<Self> {
        (from != to).then_some(Self { from, to })
    }

    pub const fn from(self) -> Square {
        self.from
    }

    pub const fn to(self) -> Square {
        self.to
    }
}

impl fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Which side sits at the bottom of the displayed board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    White,
    Black,
}

impl Orientation {
    /// Square shown in the bottom-left corner.
    pub const fn corner(self) -> Square {
        match self {
            Self::White => Square(0),
            Self::Black => Square(63),
        }
    }

    /// Square displayed at `row`/`col`, counted from the top-left corner.
    pub const fn square_at(self, row: u8, col: u8) -> Option<Square> {
        if row >= 8 || col >= 8 {
            return None;
        }
        match self {
            // rank 8 to 1, file a to h
            Self::White => Square::from_coords(col, 7 - row),
            // rank 1 to 8, file h to a
            Self::Black => Square::from_coords(7 - col, row),
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn square_coordinates_and_notation() {
        let e2 = Square::new(12).unwrap();
        assert_eq!((e2.file(), e2.rank()), (4, 1));
        assert_eq!(e2.to_string(), "e2");
        assert_eq!("e4".parse::<Square>(), Ok(Square::new(28).unwrap()));
        assert_eq!("h8".parse::<Square>().map(Square::id), Ok(63));
        assert!("i1".parse::<Square>().is_err());
        assert_eq!(Square::new(64), None);
    }

    #[test]
    fn offset_stays_on_board() {
        let a1 = Square::new(0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 1).map(Square::id), Some(9));

        let h8 = Square::new(63).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(0, 1), None);
    }

    #[test]
    fn piece_symbol_case_encodes_side() {
        let white_knight = Piece::from_symbol('N').unwrap();
        assert_eq!(white_knight, Piece::new(Side::White, PieceKind::Knight));
        assert_eq!(white_knight.symbol(), 'N');

        let black_queen = Piece::from_symbol('q').unwrap();
        assert_eq!(black_queen, Piece::new(Side::Black, PieceKind::Queen));
        assert_eq!(black_queen.symbol(), 'q');

        assert_eq!(Piece::from_symbol('x'), Err(BoardError::InvalidPiece('x')));
    }

    #[test]
    fn move_intent_requires_distinct_squares() {
        let e2 = Square::new(12).unwrap();
        let e4 = Square::new(28).unwrap();

        assert_eq!(MoveIntent::new(e2, e2), None);
        assert_eq!(MoveIntent::new(e2, e4).unwrap().to_string(), "e2e4");
    }

    #[test]
    fn square_serde_checks_range() {
        let e4: Square = serde_json::from_str("28").unwrap();
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(serde_json::to_string(&e4).unwrap(), "28");
        assert!(serde_json::from_str::<Square>("64").is_err());
    }
}
