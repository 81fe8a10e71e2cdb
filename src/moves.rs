use std::fmt::{self, Display, Formatter};

use crate::{
    board::Board,
    castling::CastleSide,
    piece::{Piece, PieceKind},
    square::{Square, pawn_promotion_row},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    Castle(CastleSide),
}
impl Display for MoveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Normal => write!(f, "move")?,
            MoveKind::Capture => write!(f, "capture")?,
            MoveKind::Castle(side) => write!(f, "{side} castle")?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
}
impl Move {
    /// The move of whatever stands on `from`, if anything does.
    pub fn on(board: &Board, from: Square, to: Square) -> Option<Self> {
        board[from].map(|piece| Move { from, to, piece })
    }
    /// Castling is recognised structurally: a king moving two files.
    pub fn castle_side(self) -> Option<CastleSide> {
        if self.piece.kind == PieceKind::King {
            CastleSide::of_king_move(self.from, self.to)
        } else {
            None
        }
    }
    pub fn is_promotion(self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.to.row() == pawn_promotion_row(self.piece.color)
    }
    /// Classification against the board the move is about to be played on.
    pub fn kind(self, board: &Board) -> MoveKind {
        if let Some(side) = self.castle_side() {
            MoveKind::Castle(side)
        } else if board[self.to].is_some() {
            MoveKind::Capture
        } else {
            MoveKind::Normal
        }
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} to {}", self.piece, self.from, self.to)?;
        Ok(())
    }
}
