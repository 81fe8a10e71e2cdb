use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    board_display::BoardDisplay,
    castling::CastleSide,
    color::Color,
    game::GameState,
    legal::legal_moves,
    piece::{Piece, PieceKind},
    square::Square,
};

/// Games longer than this are abandoned and a new one is started.
const MAX_PLIES: u32 = 300;

impl From<Color> for chess::Color {
    fn from(value: Color) -> Self {
        match value {
            Color::White => chess::Color::White,
            Color::Black => chess::Color::Black,
        }
    }
}
impl From<PieceKind> for chess::Piece {
    fn from(value: PieceKind) -> Self {
        match value {
            PieceKind::Pawn => chess::Piece::Pawn,
            PieceKind::Knight => chess::Piece::Knight,
            PieceKind::Bishop => chess::Piece::Bishop,
            PieceKind::Rook => chess::Piece::Rook,
            PieceKind::Queen => chess::Piece::Queen,
            PieceKind::King => chess::Piece::King,
        }
    }
}
impl From<Square> for chess::Square {
    fn from(value: Square) -> Self {
        chess::Square::make_square(
            chess::Rank::from_index(usize::from(7 - value.row())),
            chess::File::from_index(usize::from(value.col())),
        )
    }
}
fn castle_rights(board: &Board, color: Color) -> chess::CastleRights {
    let available = |side: CastleSide| {
        board.castling_rights().may_castle(color, side)
            && board[CastleSide::king_origin(color)] == Some(Piece::new(color, PieceKind::King))
            && board[side.rook_origin(color)] == Some(Piece::new(color, PieceKind::Rook))
    };
    match (
        available(CastleSide::Kingside),
        available(CastleSide::Queenside),
    ) {
        (true, true) => chess::CastleRights::Both,
        (true, false) => chess::CastleRights::KingSide,
        (false, true) => chess::CastleRights::QueenSide,
        (false, false) => chess::CastleRights::NoRights,
    }
}
/// The same position for the reference generator. No en passant target is
/// ever set, since this engine has no en passant.
fn reference_board(board: &Board, side_to_move: Color) -> Result<chess::Board, String> {
    let mut builder = chess::BoardBuilder::new();
    for color in Color::ALL {
        for (square, piece) in board.pieces(color) {
            builder.piece(square.into(), piece.kind.into(), color.into());
        }
        builder.castle_rights(color.into(), castle_rights(board, color));
    }
    builder.side_to_move(side_to_move.into());
    chess::Board::try_from(&builder).map_err(|err| format!("{err:?}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuzzError {
    /// The reference generator refused the position.
    InvalidPosition { position: String, reason: String },
    /// A move this engine allows but the reference does not.
    Unexpected { movement: String, position: String },
    /// A move the reference allows but this engine does not.
    Missing { movement: String, position: String },
    /// A move from [`legal_moves`] that the game refused to play.
    Refused { movement: String, position: String },
}
impl Display for FuzzError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FuzzError::InvalidPosition { position, reason } => {
                write!(f, "reference rejected the position ({reason})\n{position}")?;
            }
            FuzzError::Unexpected { movement, position } => {
                write!(f, "found {movement} but it's not a legal move\n{position}")?;
            }
            FuzzError::Missing { movement, position } => {
                write!(f, "{movement} not found\n{position}")?;
            }
            FuzzError::Refused { movement, position } => {
                write!(f, "{movement} was generated but refused\n{position}")?;
            }
        }
        Ok(())
    }
}
impl Error for FuzzError {}

fn describe(game: &GameState) -> String {
    format!(
        "{}{} to move, castling: {}",
        BoardDisplay::new(game.board()),
        game.side_to_move(),
        game.board().castling_rights(),
    )
}
/// Compares the legal moves of the side to move against the reference
/// generator, returning them sorted.
fn check_position(game: &GameState) -> Result<Vec<(Square, Square)>, FuzzError> {
    let board = game.board();
    let color = game.side_to_move();
    let mut moves: Vec<_> = board
        .pieces(color)
        .flat_map(|(origin, _)| {
            legal_moves(board, origin)
                .into_iter()
                .map(move |destination| (origin, destination))
        })
        .collect();
    moves.sort_unstable();

    let reference = reference_board(board, color).map_err(|reason| FuzzError::InvalidPosition {
        position: describe(game),
        reason,
    })?;
    let found: FxHashSet<(chess::Square, chess::Square)> = moves
        .iter()
        .map(|(origin, destination)| ((*origin).into(), (*destination).into()))
        .collect();
    let expected: FxHashSet<_> = chess::MoveGen::new_legal(&reference)
        .map(|movement| (movement.get_source(), movement.get_dest()))
        .collect();
    if let Some((origin, destination)) = found.difference(&expected).next() {
        return Err(FuzzError::Unexpected {
            movement: format!("{origin}{destination}"),
            position: describe(game),
        });
    }
    if let Some((origin, destination)) = expected.difference(&found).next() {
        return Err(FuzzError::Missing {
            movement: format!("{origin}{destination}"),
            position: describe(game),
        });
    }
    Ok(moves)
}
/// Plays random games, checking every position against the `chess` crate's
/// legal move generator. Runs forever when `games` is `None`; draws a seed from
/// the OS when `seed` is `None`. Returns the number of positions checked.
///
/// # Errors
/// Returns the first position where the two generators disagree.
pub fn fuzz(games: Option<u64>, seed: Option<u64>) -> Result<u64, FuzzError> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut game = GameState::new();
    let mut finished_games = 0;
    let mut plies = 0;
    let mut checked = 0;
    while games.is_none_or(|games| finished_games < games) {
        let moves = check_position(&game)?;
        checked += 1;
        if moves.is_empty() || plies >= MAX_PLIES {
            match game.end_state() {
                Some(end_state) => debug!("game {finished_games}: {end_state} after {plies} plies"),
                None => debug!("game {finished_games}: abandoned after {plies} plies"),
            }
            game = GameState::new();
            finished_games += 1;
            plies = 0;
            continue;
        }
        let (origin, destination) = moves[rng.random_range(0..moves.len())];
        let promotion =
            PieceKind::PROMOTION_CHOICES[rng.random_range(0..PieceKind::PROMOTION_CHOICES.len())];
        if !game
            .apply_move_with_promotion(origin, destination, promotion)
            .is_applied()
        {
            return Err(FuzzError::Refused {
                movement: format!("{origin}{destination}"),
                position: describe(&game),
            });
        }
        plies += 1;
    }
    info!("{checked} positions checked over {finished_games} games");
    Ok(checked)
}
