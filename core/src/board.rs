use alloc::collections::BTreeMap;
use gambit_protocol::SquareMap;

use crate::*;

/// Authoritative position as last reported by the engine.
///
/// Only ever built from a wire [`SquareMap`] and replaced wholesale; there is
/// no way to move a piece locally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    pieces: BTreeMap<Square, Piece>,
}

impl BoardSnapshot {
    pub fn from_square_map(map: &SquareMap) -> Result<Self> {
        if map.is_empty() {
            return Err(BoardError::Empty);
        }

        let pieces = map
            .iter()
            .map(|(&id, &symbol)| Ok((Square::try_from(id)?, Piece::from_symbol(symbol)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self { pieces })
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.pieces.contains_key(&square)
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}
