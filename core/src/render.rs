use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

impl Shade {
    /// `a1` is dark, colors alternate along both files and ranks.
    pub const fn of(square: Square) -> Self {
        if (square.rank() + square.file()) % 2 == 0 {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub const fn class(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub square: Square,
    pub shade: Shade,
    pub piece: Option<Piece>,
}

/// The 64 cells of a board in display order: top-left first, row by row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<GridCell>,
}

impl Grid {
    pub const WIDTH: usize = 8;

    pub fn render(board: &BoardSnapshot, orientation: Orientation) -> Result<Self> {
        if board.is_empty() {
            return Err(BoardError::Empty);
        }

        let cell = |square: Square| GridCell {
            square,
            shade: Shade::of(square),
            piece: board.piece_at(square),
        };

        let cells = (0..Self::WIDTH as u8)
            .flat_map(|row| (0..Self::WIDTH as u8).map(move |col| (row, col)))
            .filter_map(|(row, col)| orientation.square_at(row, col))
            .map(cell)
            .collect();

        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(Self::WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::initial_square_map;

    fn initial_board() -> BoardSnapshot {
        BoardSnapshot::from_square_map(&initial_square_map()).unwrap()
    }

    #[test]
    fn renders_exactly_64_cells_once_each() {
        for orientation in [Orientation::White, Orientation::Black] {
            let grid = Grid::render(&initial_board(), orientation).unwrap();
            let mut seen = [false; 64];
            for cell in grid.cells() {
                assert!(!seen[cell.square.id() as usize]);
                seen[cell.square.id() as usize] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn pieces_appear_only_where_the_snapshot_has_them() {
        let board = initial_board();
        let grid = Grid::render(&board, Orientation::White).unwrap();

        for cell in grid.cells() {
            assert_eq!(cell.piece, board.piece_at(cell.square));
        }
        let occupied = grid.cells().iter().filter(|c| c.piece.is_some()).count();
        assert_eq!(occupied, 32);
    }

    #[test]
    fn every_single_piece_board_renders_one_visual() {
        for id in 0..Square::COUNT {
            let mut map = gambit_protocol::SquareMap::new();
            map.insert(id, 'K');
            let board = BoardSnapshot::from_square_map(&map).unwrap();
            let grid = Grid::render(&board, Orientation::White).unwrap();

            let occupied: Vec<_> = grid
                .cells()
                .iter()
                .filter(|c| c.piece.is_some())
                .map(|c| c.square.id())
                .collect();
            assert_eq!(occupied, [id]);
        }
    }

    #[test]
    fn white_orientation_starts_at_a8() {
        let grid = Grid::render(&initial_board(), Orientation::White).unwrap();
        let first = grid.cells()[0];
        let last = grid.cells()[63];

        assert_eq!(first.square.id(), 56);
        assert_eq!(first.shade, Shade::Light);
        assert_eq!(last.square.id(), 7);
        assert_eq!(grid.cells()[56].square.id(), 0);
        assert_eq!(grid.cells()[56].shade, Shade::Dark);
    }

    #[test]
    fn black_orientation_starts_at_h1() {
        let grid = Grid::render(&initial_board(), Orientation::Black).unwrap();

        assert_eq!(grid.cells()[0].square.id(), 7);
        assert_eq!(grid.cells()[7].square.id(), 0);
        assert_eq!(grid.cells()[63].square.id(), 56);
    }

    #[test]
    fn refuses_to_render_an_empty_board() {
        assert_eq!(
            Grid::render(&BoardSnapshot::default(), Orientation::White),
            Err(BoardError::Empty)
        );
    }
}
