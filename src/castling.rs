use std::fmt::{self, Display, Formatter};

use crate::{
    color::Color,
    square::{Square, home_row},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}
impl CastleSide {
    pub const ALL: [Self; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub const KING_ORIGIN_COL: u8 = 4;

    pub fn rook_origin_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }
    pub fn rook_destination_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }
    pub fn king_destination_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }
    pub fn king_origin(color: Color) -> Square {
        Square::new(home_row(color), CastleSide::KING_ORIGIN_COL)
    }
    pub fn king_destination(self, color: Color) -> Square {
        Square::new(home_row(color), self.king_destination_col())
    }
    pub fn rook_origin(self, color: Color) -> Square {
        Square::new(home_row(color), self.rook_origin_col())
    }
    pub fn rook_destination(self, color: Color) -> Square {
        Square::new(home_row(color), self.rook_destination_col())
    }
    /// The side of a king move, if it is a castling move.
    pub fn of_king_move(origin: Square, destination: Square) -> Option<Self> {
        if origin.row() != destination.row() {
            return None;
        }
        match i16::from(destination.col()) - i16::from(origin.col()) {
            2 => Some(CastleSide::Kingside),
            -2 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
    /// The color and side whose rook starts on `square`.
    pub fn of_rook_origin(square: Square) -> Option<(Color, Self)> {
        Color::ALL.into_iter().find_map(|color| {
            CastleSide::ALL
                .into_iter()
                .find(|side| side.rook_origin(color) == square)
                .map(|side| (color, side))
        })
    }
}
impl Display for CastleSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::Kingside => write!(f, "kingside")?,
            CastleSide::Queenside => write!(f, "queenside")?,
        }
        Ok(())
    }
}

/// Moved flags of one color. Once set, a flag is never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MovedFlags {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}
impl MovedFlags {
    pub fn rook_moved(self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside_rook_moved,
            CastleSide::Queenside => self.queenside_rook_moved,
        }
    }
    pub fn may_castle(self, side: CastleSide) -> bool {
        !self.king_moved && !self.rook_moved(side)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    white: MovedFlags,
    black: MovedFlags,
}
impl CastlingRights {
    pub fn new() -> Self {
        CastlingRights::default()
    }
    /// Rights where every king and rook counts as moved.
    pub fn none() -> Self {
        let moved = MovedFlags {
            king_moved: true,
            kingside_rook_moved: true,
            queenside_rook_moved: true,
        };
        CastlingRights {
            white: moved,
            black: moved,
        }
    }
    pub fn get(self, color: Color) -> MovedFlags {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
    fn get_mut(&mut self, color: Color) -> &mut MovedFlags {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
    pub fn may_castle(self, color: Color, side: CastleSide) -> bool {
        self.get(color).may_castle(side)
    }
    pub fn mark_king_moved(&mut self, color: Color) {
        self.get_mut(color).king_moved = true;
    }
    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        let flags = self.get_mut(color);
        match side {
            CastleSide::Kingside => flags.kingside_rook_moved = true,
            CastleSide::Queenside => flags.queenside_rook_moved = true,
        }
    }
    /// Marks the rook starting on `square` as moved, if any. Covers both a rook
    /// leaving its corner and a capture landing on it.
    pub fn touch(&mut self, square: Square) {
        if let Some((color, side)) = CastleSide::of_rook_origin(square) {
            self.mark_rook_moved(color, side);
        }
    }
}
impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if self.may_castle(color, side) {
                    if written {
                        write!(f, ", ")?;
                    }
                    written = true;
                    write!(f, "{color} {side}")?;
                }
            }
        }
        if !written {
            write!(f, "-")?;
        }
        Ok(())
    }
}
