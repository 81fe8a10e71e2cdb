use std::fmt::{self, Display, Formatter};

use crate::{board::Board, color::Color, piece::Piece, square::Square};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const LEGAL_DESTINATION: &str = "\x1b[30;106m";
const RESET: &str = "\x1b[0m";

/// Renders the board with ANSI colours from `view`'s side, with `info` lines
/// printed to the right of the ranks.
pub struct BoardDisplay<'a, 'b> {
    pub board: &'a Board,
    pub view: Color,
    pub info: &'b str,
}
impl<'a> BoardDisplay<'a, '_> {
    pub fn new(board: &'a Board) -> Self {
        BoardDisplay {
            board,
            view: Color::White,
            info: "",
        }
    }
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let row = match self.view {
                Color::White => row,
                Color::Black => 7 - row,
            };
            for col in 0..8 {
                let col = match self.view {
                    Color::White => col,
                    Color::Black => 7 - col,
                };
                let cell = self.board.cell(Square::new(row, col));
                let color = if cell.legal_destination {
                    LEGAL_DESTINATION
                } else if cell.highlighted {
                    HIGHLIGHTED
                } else {
                    match cell.shade {
                        Color::White => WHITE,
                        Color::Black => BLACK,
                    }
                };
                let figurine = cell.piece.map_or(' ', Piece::figurine);
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", 8 - row)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
