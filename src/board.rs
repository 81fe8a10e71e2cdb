use std::{
    fmt::{self, Display, Formatter},
    ops::Index,
};

use crate::{
    castling::CastlingRights,
    color::Color,
    moves::Move,
    piece::{Piece, PieceKind},
    square::Square,
};

/// One square of the board as the front-end sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub piece: Option<Piece>,
    /// Cosmetic, has no effect on the rules.
    pub shade: Color,
    pub highlighted: bool,
    pub legal_destination: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct KingSquares {
    white: Option<Square>,
    black: Option<Square>,
}
impl KingSquares {
    fn get(self, color: Color) -> Option<Square> {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
    fn get_mut(&mut self, color: Color) -> &mut Option<Square> {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// The 8×8 grid together with castling rights and the location of both kings.
///
/// Boards are plain values: legality trials clone them, so no trial ever sees
/// another trial's mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; 8]; 8],
    kings: KingSquares,
    castling_rights: CastlingRights,
}
impl Board {
    pub fn empty() -> Self {
        Board::from_rows([[None; 8]; 8])
    }
    pub fn from_rows(rows: [[Option<Piece>; 8]; 8]) -> Self {
        let mut board = Board {
            cells: [[Cell {
                piece: None,
                shade: Color::White,
                highlighted: false,
                legal_destination: false,
            }; 8]; 8],
            kings: KingSquares::default(),
            castling_rights: CastlingRights::new(),
        };
        for square in Square::all() {
            board.cells[square.row() as usize][square.col() as usize].shade = square.shade();
            board.set(square, rows[square.row() as usize][square.col() as usize]);
        }
        board
    }
    pub fn cell(&self, square: Square) -> &Cell {
        &self.cells[square.row() as usize][square.col() as usize]
    }
    fn cell_mut(&mut self, square: Square) -> &mut Cell {
        &mut self.cells[square.row() as usize][square.col() as usize]
    }
    /// Lookup by raw coordinates; anything off the board is `None`.
    pub fn cell_checked(&self, row: i32, col: i32) -> Option<&Cell> {
        Square::new_checked(row, col).map(|square| self.cell(square))
    }
    pub fn cells(&self) -> impl Iterator<Item = (Square, &Cell)> {
        Square::all().map(|square| (square, self.cell(square)))
    }
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells().filter_map(move |(square, cell)| {
            cell.piece
                .filter(|piece| piece.color == color)
                .map(|piece| (square, piece))
        })
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    pub fn set_castling_rights(&mut self, castling_rights: CastlingRights) {
        self.castling_rights = castling_rights;
    }
    /// Cached location of the king of `color`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings.get(color)
    }
    /// Location of the king of `color` found by scanning the grid.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }
    /// Replaces the occupant of `square`, keeping the king cache in sync.
    ///
    /// Assumes at most one king per colour. Clearing one of two same-coloured
    /// kings leaves the cache empty while the other is still on the board.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let old = std::mem::replace(&mut self.cell_mut(square).piece, piece);
        if let Some(old) = old
            && old.kind == PieceKind::King
            && self.kings.get(old.color) == Some(square)
        {
            *self.kings.get_mut(old.color) = None;
        }
        if let Some(piece) = piece
            && piece.kind == PieceKind::King
        {
            *self.kings.get_mut(piece.color) = Some(square);
        }
        old
    }
    /// Moves whatever stands on `origin` to `destination`, overwriting it.
    pub fn move_piece(&mut self, origin: Square, destination: Square) -> Option<Piece> {
        let piece = self.set(origin, None);
        self.set(destination, piece)
    }
    /// Executes `movement` with all of its side effects: rook relocation when
    /// castling, moved flags, pawn substitution on the last rank, and the king
    /// cache. Returns the captured piece.
    ///
    /// Performs no legality check.
    pub fn play(&mut self, movement: Move, promotion: PieceKind) -> Option<Piece> {
        let color = movement.piece.color;
        if let Some(side) = movement.castle_side() {
            self.move_piece(side.rook_origin(color), side.rook_destination(color));
            self.castling_rights.mark_rook_moved(color, side);
        }
        if movement.piece.kind == PieceKind::King {
            self.castling_rights.mark_king_moved(color);
        }
        self.castling_rights.touch(movement.from);
        self.castling_rights.touch(movement.to);

        let captured = self.move_piece(movement.from, movement.to);
        if movement.is_promotion() {
            self.set(movement.to, Some(Piece::new(color, promotion)));
        }
        debug_assert!(self.kings_are_consistent());
        captured
    }
    /// A scratch copy with `movement` applied.
    pub fn simulate(&self, movement: Move) -> Self {
        let mut scratch = self.clone();
        scratch.play(movement, PieceKind::Queen);
        scratch
    }
    pub fn kings_are_consistent(&self) -> bool {
        Color::ALL
            .into_iter()
            .all(|color| self.king_square(color) == self.find_king(color))
    }
    pub fn clear_marks(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                cell.highlighted = false;
                cell.legal_destination = false;
            }
        }
    }
    pub fn highlight(&mut self, square: Square) {
        self.cell_mut(square).highlighted = true;
    }
    pub fn mark_legal_destinations(&mut self, destinations: impl IntoIterator<Item = Square>) {
        for square in destinations {
            self.cell_mut(square).legal_destination = true;
        }
    }
    pub fn legal_destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.cells()
            .filter(|(_, cell)| cell.legal_destination)
            .map(|(square, _)| square)
    }
}
impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.cell(index).piece
    }
}
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (square, cell) in self.cells() {
            if let Some(piece) = cell.piece {
                if !first {
                    write!(f, ", ")?;
                }
                first = false;
                write!(f, "{piece} on {square}")?;
            }
        }
        Ok(())
    }
}
