use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Mul, Sub},
    str::FromStr,
};

use crate::color::Color;

/// Builds a [`Square`] from its name at compile time, e.g. `square!("e4")`.
#[macro_export]
macro_rules! square {
    ($name:literal) => {
        const { $crate::square::Square::from_name($name) }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSquareError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSquareError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseSquareError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseSquareError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseSquareError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseSquareError {}

/// A square of the board. Row 0 is the 8th rank, col 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}
impl Square {
    /// Callers outside the crate go through [`Square::new_checked`],
    /// [`FromStr`] or [`square!`], so every public square is on the board.
    pub(crate) const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8);
        debug_assert!(col < 8);
        Square { row, col }
    }
    /// Out-of-range coordinates are "no square" rather than an error.
    pub fn new_checked(row: i32, col: i32) -> Option<Self> {
        let row = u8::try_from(row).ok().filter(|row| *row < 8)?;
        let col = u8::try_from(col).ok().filter(|col| *col < 8)?;
        Some(Square::new(row, col))
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseSquareError> {
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::InvalidFile(file)),
        };
        let row = match rank {
            '1'..='8' => 7 - (rank as u8 - b'1'),
            _ => return Err(ParseSquareError::InvalidRank(rank)),
        };
        Ok(Square::new(row, col))
    }
    /// # Panics
    /// Panics on anything other than a valid name such as `"e4"`. Meant for
    /// const contexts through [`square!`].
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        assert!(bytes.len() == 2, "square names have exactly 2 characters");
        assert!(bytes[0] >= b'a' && bytes[0] <= b'h', "file must be a to h");
        assert!(bytes[1] >= b'1' && bytes[1] <= b'8', "rank must be 1 to 8");
        Square::new(7 - (bytes[1] - b'1'), bytes[0] - b'a')
    }
    pub fn row(self) -> u8 {
        self.row
    }
    pub fn col(self) -> u8 {
        self.col
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            i32::from(self.row) + i32::from(movement.row),
            i32::from(self.col) + i32::from(movement.col),
        )
    }
    /// Squares along `direction`, excluding `self`, until the edge of the board.
    pub fn ray(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
    /// Squares strictly between `self` and `end` on the same row.
    pub fn between_on_row(self, end: Self) -> impl Iterator<Item = Self> {
        debug_assert_eq!(self.row, end.row);
        let row = self.row;
        (Ord::min(self.col, end.col) + 1..Ord::max(self.col, end.col))
            .map(move |col| Square::new(row, col))
    }
    /// Cosmetic shade of the square; a1 is dark.
    pub fn shade(self) -> Color {
        if (self.row + self.col) % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}
/// Row of the back rank of `color`.
pub fn home_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
pub fn pawn_home_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}
pub fn pawn_promotion_row(color: Color) -> u8 {
    home_row(!color)
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.col + b'a') as char;
        let rank = 8 - self.row;
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseSquareError::Unexpected(c));
        }
        Square::from_chars(file, rank)
    }
}
impl Sub<Self> for Square {
    type Output = Vector;

    #[allow(clippy::cast_possible_wrap, reason = "rows and cols are < 8")]
    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            row: self.row as i8 - rhs.row as i8,
            col: self.col as i8 - rhs.col as i8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub row: i8,
    pub col: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { row: 0, col: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { row: -2, col: -1 },
        Vector { row: -2, col: 1 },
        Vector { row: -1, col: -2 },
        Vector { row: -1, col: 2 },
        Vector { row: 1, col: -2 },
        Vector { row: 1, col: 2 },
        Vector { row: 2, col: -1 },
        Vector { row: 2, col: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { row: -1, col: -1 },
        Vector { row: -1, col: 0 },
        Vector { row: -1, col: 1 },
        Vector { row: 0, col: -1 },
        Vector { row: 0, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: 1, col: 0 },
        Vector { row: 1, col: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, col: 0 },
        Vector { row: 1, col: 0 },
        Vector { row: 0, col: -1 },
        Vector { row: 0, col: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, col: -1 },
        Vector { row: -1, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: 1, col: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            row: pawn_direction(color),
            col: 0,
        }
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        [-1, 1].map(|col| Vector {
            row: pawn_direction(color),
            col,
        })
    }
    pub fn is_king_move(self) -> bool {
        self != Vector::ZERO && self.row.abs() <= 1 && self.col.abs() <= 1
    }
    pub fn is_knight_move(self) -> bool {
        let row = self.row.unsigned_abs();
        let col = self.col.unsigned_abs();
        (row == 1 && col == 2) || (row == 2 && col == 1)
    }
    pub fn is_pawn_attack(self, color: Color) -> bool {
        self.col.unsigned_abs() == 1 && self.row == pawn_direction(color)
    }
    pub fn as_unit(self) -> Self {
        Vector {
            row: self.row.signum(),
            col: self.col.signum(),
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            row: self.row * rhs,
            col: self.col * rhs,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::square::{Square, Vector};

    #[test]
    fn names_map_to_rows_and_cols() {
        assert_eq!(square!("a8"), Square::new(0, 0));
        assert_eq!(square!("h1"), Square::new(7, 7));
        assert_eq!(square!("e2"), Square::new(6, 4));
        assert_eq!("e2".parse::<Square>(), Ok(square!("e2")));
        assert_eq!(square!("g7").to_string(), "g7");
    }
    #[test]
    fn out_of_bounds_is_no_square() {
        assert_eq!(Square::new_checked(-1, 3), None);
        assert_eq!(Square::new_checked(3, 8), None);
        assert_eq!(square!("h8").move_by(Vector { row: -1, col: 0 }), None);
        assert!("i1".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }
    #[test]
    fn ray_stops_at_the_edge() {
        let ray: Vec<_> = square!("f1").ray(Vector { row: 0, col: 1 }).collect();
        assert_eq!(ray, [square!("g1"), square!("h1")]);
    }
    #[test]
    fn between_on_row_is_exclusive() {
        let between: Vec<_> = square!("e1").between_on_row(square!("a1")).collect();
        assert_eq!(between, [square!("b1"), square!("c1"), square!("d1")]);
        assert_eq!(square!("e1").between_on_row(square!("f1")).next(), None);
    }
}
