use crate::{
    attack::is_king_in_check, board::Board, color::Color, end_state::EndState,
    legal::legal_moves,
};

/// Whether any piece of `color` has a legal move. Stops at the first piece
/// that does.
pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces(color)
        .any(|(square, _)| !legal_moves(board, square).is_empty())
}
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_king_in_check(board, color) && !has_any_legal_move(board, color)
}
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_king_in_check(board, color) && !has_any_legal_move(board, color)
}
/// How the game ends with `color` to move, if it does.
pub fn end_state(board: &Board, color: Color) -> Option<EndState> {
    if has_any_legal_move(board, color) {
        None
    } else if is_king_in_check(board, color) {
        Some(EndState::Checkmate { winner: !color })
    } else {
        Some(EndState::Stalemate)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        checkmate::{end_state, has_any_legal_move, is_checkmate, is_stalemate},
        color::Color,
        end_state::EndState,
        legal::legal_moves,
        piece::{Piece, PieceKind},
        square,
        square::Square,
    };

    fn place(board: &mut Board, square: Square, color: Color, kind: PieceKind) {
        board.set(square, Some(Piece::new(color, kind)));
    }
    /// White king on e1 boxed in by its own pawns, black queen on h1.
    fn back_rank_mate() -> Board {
        let mut board = Board::empty();
        place(&mut board, square!("e1"), Color::White, PieceKind::King);
        place(&mut board, square!("d2"), Color::White, PieceKind::Pawn);
        place(&mut board, square!("e2"), Color::White, PieceKind::Pawn);
        place(&mut board, square!("f2"), Color::White, PieceKind::Pawn);
        place(&mut board, square!("h1"), Color::Black, PieceKind::Queen);
        place(&mut board, square!("e8"), Color::Black, PieceKind::King);
        board
    }
    #[test]
    fn back_rank_mate_is_checkmate() {
        let board = back_rank_mate();
        assert!(!has_any_legal_move(&board, Color::White));
        assert!(is_checkmate(&board, Color::White));
        assert!(!is_stalemate(&board, Color::White));
        assert_eq!(
            end_state(&board, Color::White),
            Some(EndState::Checkmate {
                winner: Color::Black
            })
        );
    }
    #[test]
    fn an_escape_square_is_not_checkmate() {
        let mut board = back_rank_mate();
        board.set(square!("d2"), None);
        assert!(!is_checkmate(&board, Color::White));
        assert!(legal_moves(&board, square!("e1")).contains(&square!("d2")));
        assert_eq!(end_state(&board, Color::White), None);
    }
    #[test]
    fn a_blocker_is_not_checkmate() {
        let mut board = back_rank_mate();
        place(&mut board, square!("e3"), Color::White, PieceKind::Knight);
        assert!(!is_checkmate(&board, Color::White));
        assert_eq!(
            legal_moves(&board, square!("e3")),
            [square!("f1")].into_iter().collect()
        );
    }
    #[test]
    fn cornered_king_is_stalemate() {
        let mut board = Board::empty();
        place(&mut board, square!("h8"), Color::Black, PieceKind::King);
        place(&mut board, square!("f7"), Color::White, PieceKind::Queen);
        place(&mut board, square!("g6"), Color::White, PieceKind::King);
        assert!(is_stalemate(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::Black));
        assert_eq!(end_state(&board, Color::Black), Some(EndState::Stalemate));
        assert!(has_any_legal_move(&board, Color::White));
    }
}
