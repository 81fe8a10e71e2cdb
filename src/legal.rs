use std::iter::once;

use rustc_hash::FxHashSet;

use crate::{
    attack::{is_king_in_check, is_square_attacked},
    board::Board,
    castling::CastleSide,
    color::Color,
    movegen::candidate_moves,
    moves::Move,
    square::Square,
};

/// A king castling from `king` must not be attacked where it stands, nor on
/// any square it passes through or lands on. Stops at the first attacked
/// square.
fn castling_path_is_safe(board: &Board, king: Square, color: Color, side: CastleSide) -> bool {
    if is_square_attacked(board, king, !color) {
        return false;
    }
    let destination = side.king_destination(color);
    king.between_on_row(destination)
        .chain(once(destination))
        .all(|square| {
            let mut scratch = board.clone();
            scratch.move_piece(king, square);
            !is_king_in_check(&scratch, color)
        })
}
/// Whether `movement` leaves its own king safe once played on a scratch copy.
pub fn is_legal(board: &Board, movement: Move) -> bool {
    let color = movement.piece.color;
    if let Some(side) = movement.castle_side()
        && !castling_path_is_safe(board, movement.from, color, side)
    {
        return false;
    }
    !is_king_in_check(&board.simulate(movement), color)
}
/// Every destination the piece on `origin` may legally move to, whoever's turn
/// it is. Empty when `origin` is empty.
pub fn legal_moves(board: &Board, origin: Square) -> FxHashSet<Square> {
    let Some(piece) = board[origin] else {
        return FxHashSet::default();
    };
    candidate_moves(board, origin)
        .into_iter()
        .filter(|destination| {
            is_legal(
                board,
                Move {
                    from: origin,
                    to: *destination,
                    piece,
                },
            )
        })
        .collect()
}
/// [`legal_moves`] by raw coordinates; off-board coordinates have no moves.
pub fn legal_moves_checked(board: &Board, row: i32, col: i32) -> FxHashSet<Square> {
    Square::new_checked(row, col)
        .map(|origin| legal_moves(board, origin))
        .unwrap_or_default()
}
#[cfg(test)]
mod test {
    use rustc_hash::FxHashSet;

    use crate::{
        attack::is_king_in_check,
        board::Board,
        color::Color,
        legal::{legal_moves, legal_moves_checked},
        moves::Move,
        piece::{Piece, PieceKind},
        square,
        square::Square,
    };

    fn place(board: &mut Board, square: Square, color: Color, kind: PieceKind) {
        board.set(square, Some(Piece::new(color, kind)));
    }
    fn castling_board() -> Board {
        let mut board = Board::empty();
        place(&mut board, square!("e1"), Color::White, PieceKind::King);
        place(&mut board, square!("h1"), Color::White, PieceKind::Rook);
        place(&mut board, square!("a1"), Color::White, PieceKind::Rook);
        place(&mut board, square!("e8"), Color::Black, PieceKind::King);
        board
    }
    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let mut board = Board::empty();
        place(&mut board, square!("e1"), Color::White, PieceKind::King);
        place(&mut board, square!("e2"), Color::White, PieceKind::Knight);
        place(&mut board, square!("e7"), Color::Black, PieceKind::Rook);
        place(&mut board, square!("e8"), Color::Black, PieceKind::King);
        assert!(legal_moves(&board, square!("e2")).is_empty());
    }
    #[test]
    fn pinned_slider_moves_along_the_pin() {
        let mut board = Board::empty();
        place(&mut board, square!("e1"), Color::White, PieceKind::King);
        place(&mut board, square!("e3"), Color::White, PieceKind::Rook);
        place(&mut board, square!("e7"), Color::Black, PieceKind::Rook);
        let moves = legal_moves(&board, square!("e3"));
        let expected: FxHashSet<_> = [
            square!("e2"),
            square!("e4"),
            square!("e5"),
            square!("e6"),
            square!("e7"),
        ]
        .into_iter()
        .collect();
        assert_eq!(moves, expected);
    }
    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::empty();
        place(&mut board, square!("e1"), Color::White, PieceKind::King);
        place(&mut board, square!("d8"), Color::Black, PieceKind::Rook);
        let moves = legal_moves(&board, square!("e1"));
        assert!(!moves.contains(&square!("d1")));
        assert!(!moves.contains(&square!("d2")));
        assert!(moves.contains(&square!("f2")));
    }
    #[test]
    fn king_cannot_capture_a_defended_piece() {
        let mut board = Board::empty();
        place(&mut board, square!("e1"), Color::White, PieceKind::King);
        place(&mut board, square!("e2"), Color::Black, PieceKind::Queen);
        place(&mut board, square!("e6"), Color::Black, PieceKind::Rook);
        let moves = legal_moves(&board, square!("e1"));
        assert!(!moves.contains(&square!("e2")));
        assert!(moves.is_empty());
    }
    #[test]
    fn check_must_be_answered() {
        let mut board = Board::empty();
        place(&mut board, square!("e1"), Color::White, PieceKind::King);
        place(&mut board, square!("a5"), Color::Black, PieceKind::Bishop);
        place(&mut board, square!("b1"), Color::White, PieceKind::Knight);
        place(&mut board, square!("h3"), Color::White, PieceKind::Rook);
        place(&mut board, square!("h7"), Color::White, PieceKind::Bishop);
        assert_eq!(
            legal_moves(&board, square!("b1")),
            [square!("c3"), square!("d2")].into_iter().collect()
        );
        assert_eq!(
            legal_moves(&board, square!("h3")),
            [square!("c3")].into_iter().collect()
        );
        assert!(legal_moves(&board, square!("h7")).is_empty());
    }
    #[test]
    fn pawn_double_step_only_from_home_rank() {
        let mut board = Board::empty();
        place(&mut board, square!("a1"), Color::White, PieceKind::King);
        place(&mut board, square!("h8"), Color::Black, PieceKind::King);
        place(&mut board, square!("e2"), Color::White, PieceKind::Pawn);
        place(&mut board, square!("c3"), Color::White, PieceKind::Pawn);
        place(&mut board, square!("d6"), Color::Black, PieceKind::Pawn);
        assert_eq!(
            legal_moves(&board, square!("e2")),
            [square!("e3"), square!("e4")].into_iter().collect()
        );
        assert_eq!(
            legal_moves(&board, square!("c3")),
            [square!("c4")].into_iter().collect()
        );
        assert_eq!(
            legal_moves(&board, square!("d6")),
            [square!("d5")].into_iter().collect()
        );
    }
    #[test]
    fn friendly_squares_are_never_destinations() {
        let mut board = Board::empty();
        place(&mut board, square!("d1"), Color::White, PieceKind::Queen);
        place(&mut board, square!("d2"), Color::White, PieceKind::Pawn);
        place(&mut board, square!("e2"), Color::Black, PieceKind::Pawn);
        let moves = legal_moves(&board, square!("d1"));
        assert!(!moves.contains(&square!("d2")));
        assert!(moves.contains(&square!("e2")));
        assert!(!moves.contains(&square!("f3")));
    }
    #[test]
    fn legal_moves_are_deterministic() {
        let board = castling_board();
        assert_eq!(
            legal_moves(&board, square!("e1")),
            legal_moves(&board, square!("e1"))
        );
        let mut first: Vec<_> = legal_moves(&board, square!("a1")).into_iter().collect();
        let mut second: Vec<_> = legal_moves(&board, square!("a1")).into_iter().collect();
        first.sort();
        second.sort();
        assert_eq!(first, second);
    }
    #[test]
    fn no_legal_move_leaves_the_king_in_check() {
        let mut board = castling_board();
        place(&mut board, square!("b4"), Color::Black, PieceKind::Bishop);
        place(&mut board, square!("d2"), Color::White, PieceKind::Pawn);
        for (origin, piece) in board.pieces(Color::White).collect::<Vec<_>>() {
            for destination in legal_moves(&board, origin) {
                let scratch = board.simulate(Move {
                    from: origin,
                    to: destination,
                    piece,
                });
                assert!(!is_king_in_check(&scratch, Color::White));
            }
        }
    }
    #[test]
    fn castling_both_sides() {
        let board = castling_board();
        let moves = legal_moves(&board, square!("e1"));
        assert!(moves.contains(&square!("g1")));
        assert!(moves.contains(&square!("c1")));
    }
    #[test]
    fn no_castling_out_of_check() {
        let mut board = castling_board();
        place(&mut board, square!("e5"), Color::Black, PieceKind::Rook);
        let moves = legal_moves(&board, square!("e1"));
        assert!(!moves.contains(&square!("g1")));
        assert!(!moves.contains(&square!("c1")));
    }
    #[test]
    fn no_castling_through_an_attacked_square() {
        let mut board = castling_board();
        place(&mut board, square!("f5"), Color::Black, PieceKind::Rook);
        let moves = legal_moves(&board, square!("e1"));
        assert!(!moves.contains(&square!("g1")));
        assert!(moves.contains(&square!("c1")));
    }
    #[test]
    fn queenside_rook_path_may_be_attacked() {
        let mut board = castling_board();
        place(&mut board, square!("b5"), Color::Black, PieceKind::Rook);
        assert!(legal_moves(&board, square!("e1")).contains(&square!("c1")));
    }
    #[test]
    fn no_castling_after_the_king_moved() {
        let mut board = castling_board();
        let mut rights = board.castling_rights();
        rights.mark_king_moved(Color::White);
        board.set_castling_rights(rights);
        let moves = legal_moves(&board, square!("e1"));
        assert!(!moves.contains(&square!("g1")));
        assert!(!moves.contains(&square!("c1")));
    }
    #[test]
    fn malformed_coordinates_have_no_moves() {
        let board = castling_board();
        assert!(legal_moves_checked(&board, -1, 4).is_empty());
        assert!(legal_moves_checked(&board, 7, 8).is_empty());
        assert!(legal_moves_checked(&board, 4, 4).is_empty());
        assert_eq!(
            legal_moves_checked(&board, 7, 4),
            legal_moves(&board, square!("e1"))
        );
    }
}
