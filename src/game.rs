use log::{debug, info, trace};
use rustc_hash::FxHashSet;

use crate::{
    attack::is_king_in_check,
    board::Board,
    checkmate,
    color::Color,
    end_state::EndState,
    legal::legal_moves,
    moves::{Move, MoveKind},
    piece::{Piece, PieceKind},
    square::Square,
};

const fn back_rank(color: Color) -> [Option<Piece>; 8] {
    let mut rank = [None; 8];
    let mut col = 0;
    while col < 8 {
        rank[col] = Some(Piece::new(color, PieceKind::STARTING_CONFIGURATION[col]));
        col += 1;
    }
    rank
}
/// The standard 32-piece layout, row 0 being black's back rank.
pub const STARTING_POSITION: [[Option<Piece>; 8]; 8] = [
    back_rank(Color::Black),
    [Some(Piece::new(Color::Black, PieceKind::Pawn)); 8],
    [None; 8],
    [None; 8],
    [None; 8],
    [None; 8],
    [Some(Piece::new(Color::White, PieceKind::Pawn)); 8],
    back_rank(Color::White),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AwaitingSelection,
    AwaitingDestination(Square),
}

/// What a move did, reported back to the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppliedMove {
    pub movement: Move,
    pub kind: MoveKind,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub check: Option<Color>,
    pub end_state: Option<EndState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Applied(AppliedMove),
    /// The move was not legal; nothing changed.
    Unchanged,
}
impl MoveOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }
}

/// Result of clicking a square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A piece of the side to move was picked; these are its destinations.
    Selected(FxHashSet<Square>),
    Moved(AppliedMove),
    /// Back to awaiting a selection without touching the position.
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    check_status: Option<Color>,
    phase: Phase,
    end_state: Option<EndState>,
}
impl GameState {
    pub fn new() -> Self {
        GameState::from_board(Board::from_rows(STARTING_POSITION), Color::White)
    }
    /// A game continuing from an arbitrary position.
    pub fn from_board(mut board: Board, side_to_move: Color) -> Self {
        board.clear_marks();
        let mut state = GameState {
            board,
            side_to_move,
            check_status: None,
            phase: Phase::AwaitingSelection,
            end_state: None,
        };
        state.update_status();
        state
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    /// Which side's king is attacked, if any.
    pub fn check_status(&self) -> Option<Color> {
        self.check_status
    }
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }
    pub fn is_checkmate(&self) -> bool {
        checkmate::is_checkmate(&self.board, self.side_to_move)
    }
    pub fn is_stalemate(&self) -> bool {
        checkmate::is_stalemate(&self.board, self.side_to_move)
    }
    pub fn end_state(&self) -> Option<EndState> {
        self.end_state
    }
    /// Legal destinations of the piece on `origin`, provided it belongs to the
    /// side to move and the game is still going.
    pub fn destinations(&self, origin: Square) -> FxHashSet<Square> {
        if self.end_state.is_some()
            || self.board[origin].is_none_or(|piece| piece.color != self.side_to_move)
        {
            FxHashSet::default()
        } else {
            legal_moves(&self.board, origin)
        }
    }
    fn update_status(&mut self) {
        self.check_status = Color::ALL
            .into_iter()
            .find(|color| is_king_in_check(&self.board, *color));
        self.end_state = checkmate::end_state(&self.board, self.side_to_move);
    }
    /// Plays `origin` to `destination`, substituting a queen for a pawn
    /// reaching the last rank.
    pub fn apply_move(&mut self, origin: Square, destination: Square) -> MoveOutcome {
        self.apply_move_with_promotion(origin, destination, PieceKind::Queen)
    }
    /// Plays `origin` to `destination`. A pawn reaching the last rank becomes
    /// `promotion`; kinds a pawn cannot become fall back to a queen.
    ///
    /// Anything illegal leaves the game untouched and returns
    /// [`MoveOutcome::Unchanged`].
    pub fn apply_move_with_promotion(
        &mut self,
        origin: Square,
        destination: Square,
        promotion: PieceKind,
    ) -> MoveOutcome {
        let Some(movement) = Move::on(&self.board, origin, destination) else {
            trace!("rejected {origin}{destination}: no piece on {origin}");
            return MoveOutcome::Unchanged;
        };
        if self.end_state.is_some() {
            trace!("rejected {movement}: the game is over");
            return MoveOutcome::Unchanged;
        }
        if movement.piece.color != self.side_to_move {
            trace!("rejected {movement}: it is {}'s turn", self.side_to_move);
            return MoveOutcome::Unchanged;
        }
        if !legal_moves(&self.board, origin).contains(&destination) {
            trace!("rejected {movement}: illegal destination");
            return MoveOutcome::Unchanged;
        }
        let promotion = if PieceKind::PROMOTION_CHOICES.contains(&promotion) {
            promotion
        } else {
            PieceKind::Queen
        };
        let kind = movement.kind(&self.board);
        let captured = self.board.play(movement, promotion);

        self.side_to_move = !self.side_to_move;
        self.update_status();
        self.phase = Phase::AwaitingSelection;
        self.board.clear_marks();
        self.board.highlight(origin);
        self.board.highlight(destination);

        debug!("{kind}: {movement}");
        if let Some(color) = self.check_status {
            debug!("{color} is in check");
        }
        if let Some(end_state) = self.end_state {
            info!("{end_state}");
        }
        MoveOutcome::Applied(AppliedMove {
            movement,
            kind,
            captured,
            promotion: movement.is_promotion().then_some(promotion),
            check: self.check_status,
            end_state: self.end_state,
        })
    }
    /// Click handling: selects a piece of the side to move, or attempts to
    /// move the selected piece to `square`.
    pub fn select(&mut self, square: Square) -> Selection {
        let own_piece = self.board[square].is_some_and(|piece| piece.color == self.side_to_move);
        match self.phase {
            Phase::AwaitingDestination(origin) if !own_piece => {
                match self.apply_move(origin, square) {
                    MoveOutcome::Applied(applied) => Selection::Moved(applied),
                    MoveOutcome::Unchanged => self.clear_selection(),
                }
            }
            Phase::AwaitingSelection | Phase::AwaitingDestination(_) => {
                if own_piece && self.end_state.is_none() {
                    let destinations = self.destinations(square);
                    self.board.clear_marks();
                    self.board.highlight(square);
                    self.board.mark_legal_destinations(destinations.iter().copied());
                    self.phase = Phase::AwaitingDestination(square);
                    Selection::Selected(destinations)
                } else {
                    self.clear_selection()
                }
            }
        }
    }
    fn clear_selection(&mut self) -> Selection {
        self.board.clear_marks();
        self.phase = Phase::AwaitingSelection;
        Selection::Cleared
    }
}
impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
