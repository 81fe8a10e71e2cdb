use crate::{
    board::Board,
    color::Color,
    piece::PieceKind,
    square::{Square, Vector},
};

/// Whether the piece on `attacker` reaches `target`, ignoring whose turn it is
/// and whether the move would expose its own king.
///
/// Sliding pieces reach up to and including the first occupied square of a
/// ray. Pawns only reach their two forward diagonals.
pub fn attacks(board: &Board, attacker: Square, target: Square) -> bool {
    let Some(piece) = board[attacker] else {
        return false;
    };
    if attacker == target {
        return false;
    }
    let offset = target - attacker;
    match piece.kind {
        PieceKind::Pawn => offset.is_pawn_attack(piece.color),
        PieceKind::Knight => offset.is_knight_move(),
        PieceKind::King => offset.is_king_move(),
        PieceKind::Bishop => slides_to(board, attacker, target, &Vector::BISHOP_DIRECTIONS),
        PieceKind::Rook => slides_to(board, attacker, target, &Vector::ROOK_DIRECTIONS),
        PieceKind::Queen => slides_to(board, attacker, target, &Vector::QUEEN_DIRECTIONS),
    }
}
fn slides_to(board: &Board, origin: Square, target: Square, directions: &[Vector]) -> bool {
    let offset = target - origin;
    let straight = offset.row == 0 || offset.col == 0 || offset.row.abs() == offset.col.abs();
    let direction = offset.as_unit();
    straight
        && directions.contains(&direction)
        && origin
            .ray(direction)
            .take_while(|square| *square != target)
            .all(|square| board[square].is_none())
}
/// Whether any piece of `color` attacks `target`.
pub fn is_square_attacked(board: &Board, target: Square, color: Color) -> bool {
    board
        .pieces(color)
        .any(|(square, _)| attacks(board, square, target))
}
/// Whether the king of `color` is attacked. A board without that king is never
/// in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    debug_assert_eq!(
        board.king_square(color),
        board.find_king(color),
        "king cache out of sync for {color}"
    );
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, !color))
}
