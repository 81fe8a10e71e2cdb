use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    castling::CastleSide,
    color::Color,
    piece::{Piece, PieceKind},
    square::{Square, Vector, pawn_home_row},
};

fn step_moves<'a>(
    board: &'a Board,
    origin: Square,
    color: Color,
    moves: &'a [Vector],
) -> impl Iterator<Item = Square> + 'a {
    moves
        .iter()
        .copied()
        .filter_map(move |movement| origin.move_by(movement))
        .filter(move |destination| board[*destination].is_none_or(|piece| piece.color != color))
}
fn directional_moves(
    board: &Board,
    origin: Square,
    color: Color,
    direction: Vector,
) -> impl Iterator<Item = Square> + '_ {
    let mut resume = true;
    origin.ray(direction).map_while(move |destination| {
        if !resume {
            return None;
        }
        match board[destination] {
            None => Some(destination),
            Some(piece) => {
                resume = false;
                (piece.color != color).then_some(destination)
            }
        }
    })
}
fn all_directional_moves<'a>(
    board: &'a Board,
    origin: Square,
    color: Color,
    directions: &'a [Vector],
) -> impl Iterator<Item = Square> + 'a {
    directions
        .iter()
        .copied()
        .flat_map(move |direction| directional_moves(board, origin, color, direction))
}
fn pawn_moves(board: &Board, origin: Square, color: Color) -> impl Iterator<Item = Square> + '_ {
    let forward_steps = if origin.row() == pawn_home_row(color) {
        2
    } else {
        1
    };
    origin
        .ray(Vector::pawn_single_move(color))
        .take(forward_steps)
        .take_while(move |destination| board[*destination].is_none())
        .chain(
            Vector::pawn_attacks(color)
                .into_iter()
                .filter_map(move |movement| origin.move_by(movement))
                .filter(move |destination| {
                    board[*destination].is_some_and(|piece| piece.color != color)
                }),
        )
}
/// Castling sides whose geometric preconditions hold for the king on `king`:
/// the king stands on its home square, neither it nor the rook has moved, the
/// rook is in its corner, and every square between them is empty.
///
/// Attacked squares are left to the legality filter.
pub fn castling_candidates(
    board: &Board,
    king: Square,
    color: Color,
) -> impl Iterator<Item = CastleSide> + '_ {
    CastleSide::ALL.into_iter().filter(move |side| {
        king == CastleSide::king_origin(color)
            && board[king] == Some(Piece::new(color, PieceKind::King))
            && board.castling_rights().may_castle(color, *side)
            && board[side.rook_origin(color)] == Some(Piece::new(color, PieceKind::Rook))
            && king
                .between_on_row(side.rook_origin(color))
                .all(|square| board[square].is_none())
    })
}
/// Pseudo-legal destinations of the piece on `origin`: movement geometry,
/// blocking and capture rules, but not self-check.
pub fn candidate_moves(board: &Board, origin: Square) -> FxHashSet<Square> {
    let Some(piece) = board[origin] else {
        return FxHashSet::default();
    };
    let color = piece.color;
    let moves: Box<dyn Iterator<Item = Square> + '_> = match piece.kind {
        PieceKind::Pawn => Box::new(pawn_moves(board, origin, color)),
        PieceKind::Knight => Box::new(step_moves(board, origin, color, &Vector::KNIGHT_MOVES)),
        PieceKind::Bishop => Box::new(all_directional_moves(
            board,
            origin,
            color,
            &Vector::BISHOP_DIRECTIONS,
        )),
        PieceKind::Rook => Box::new(all_directional_moves(
            board,
            origin,
            color,
            &Vector::ROOK_DIRECTIONS,
        )),
        PieceKind::Queen => Box::new(all_directional_moves(
            board,
            origin,
            color,
            &Vector::QUEEN_DIRECTIONS,
        )),
        PieceKind::King => Box::new(
            step_moves(board, origin, color, &Vector::KING_MOVES).chain(
                castling_candidates(board, origin, color)
                    .map(move |side| side.king_destination(color)),
            ),
        ),
    };
    moves.collect()
}
#[cfg(test)]
mod test {
    use rustc_hash::FxHashSet;

    use crate::{
        board::Board,
        color::Color,
        movegen::candidate_moves,
        piece::{Piece, PieceKind},
        square,
        square::Square,
    };

    fn set(squares: &[Square]) -> FxHashSet<Square> {
        squares.iter().copied().collect()
    }
    fn place(board: &mut Board, square: Square, color: Color, kind: PieceKind) {
        board.set(square, Some(Piece::new(color, kind)));
    }
    #[test]
    fn pawn_double_step_from_home_rank() {
        let mut board = Board::empty();
        place(&mut board, square!("e2"), Color::White, PieceKind::Pawn);
        assert_eq!(
            candidate_moves(&board, square!("e2")),
            set(&[square!("e3"), square!("e4")])
        );
        place(&mut board, square!("e4"), Color::Black, PieceKind::Knight);
        assert_eq!(candidate_moves(&board, square!("e2")), set(&[square!("e3")]));
        place(&mut board, square!("e3"), Color::Black, PieceKind::Knight);
        assert!(candidate_moves(&board, square!("e2")).is_empty());
    }
    #[test]
    fn pawn_off_home_rank_steps_once() {
        let mut board = Board::empty();
        place(&mut board, square!("d6"), Color::Black, PieceKind::Pawn);
        assert_eq!(candidate_moves(&board, square!("d6")), set(&[square!("d5")]));
        place(&mut board, square!("a3"), Color::White, PieceKind::Pawn);
        assert_eq!(candidate_moves(&board, square!("a3")), set(&[square!("a4")]));
    }
    #[test]
    fn pawn_captures_enemies_only() {
        let mut board = Board::empty();
        place(&mut board, square!("d4"), Color::White, PieceKind::Pawn);
        place(&mut board, square!("c5"), Color::Black, PieceKind::Bishop);
        place(&mut board, square!("e5"), Color::White, PieceKind::Bishop);
        assert_eq!(
            candidate_moves(&board, square!("d4")),
            set(&[square!("d5"), square!("c5")])
        );
    }
    #[test]
    fn knight_in_the_corner() {
        let mut board = Board::empty();
        place(&mut board, square!("a1"), Color::White, PieceKind::Knight);
        place(&mut board, square!("c2"), Color::White, PieceKind::Pawn);
        assert_eq!(candidate_moves(&board, square!("a1")), set(&[square!("b3")]));
    }
    #[test]
    fn rook_rays_stop_at_blockers() {
        let mut board = Board::empty();
        place(&mut board, square!("d4"), Color::White, PieceKind::Rook);
        place(&mut board, square!("d6"), Color::Black, PieceKind::Pawn);
        place(&mut board, square!("f4"), Color::White, PieceKind::Pawn);
        let moves = candidate_moves(&board, square!("d4"));
        assert!(moves.contains(&square!("d5")));
        assert!(moves.contains(&square!("d6")));
        assert!(!moves.contains(&square!("d7")));
        assert!(moves.contains(&square!("e4")));
        assert!(!moves.contains(&square!("f4")));
        assert!(moves.contains(&square!("a4")));
        assert!(moves.contains(&square!("d1")));
        assert_eq!(moves.len(), 3 + 2 + 1 + 3);
    }
    #[test]
    fn queen_is_rook_and_bishop() {
        let mut board = Board::empty();
        place(&mut board, square!("d4"), Color::Black, PieceKind::Queen);
        assert_eq!(candidate_moves(&board, square!("d4")).len(), 27);
        place(&mut board, square!("a1"), Color::Black, PieceKind::Bishop);
        assert_eq!(
            candidate_moves(&board, square!("a1")),
            set(&[square!("b2"), square!("c3")])
        );
    }
    #[test]
    fn empty_square_has_no_moves() {
        assert!(candidate_moves(&Board::empty(), square!("e4")).is_empty());
    }
    #[test]
    fn king_emits_castling_when_the_path_is_clear() {
        let mut board = Board::empty();
        place(&mut board, square!("e1"), Color::White, PieceKind::King);
        place(&mut board, square!("h1"), Color::White, PieceKind::Rook);
        place(&mut board, square!("a1"), Color::White, PieceKind::Rook);
        place(&mut board, square!("b1"), Color::White, PieceKind::Knight);
        let moves = candidate_moves(&board, square!("e1"));
        assert!(moves.contains(&square!("g1")));
        assert!(!moves.contains(&square!("c1")));
    }
    #[test]
    fn no_castling_without_the_rook() {
        let mut board = Board::empty();
        place(&mut board, square!("e8"), Color::Black, PieceKind::King);
        place(&mut board, square!("h8"), Color::White, PieceKind::Rook);
        assert!(!candidate_moves(&board, square!("e8")).contains(&square!("g8")));
    }
}
