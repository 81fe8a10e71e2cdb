use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use log::debug;

use crate::{
    board_display::BoardDisplay,
    color::Color,
    game::{GameState, MoveOutcome, Selection},
    piece::PieceKind,
    square::{ParseSquareError, Square},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Square(Square),
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Square(square) => write!(f, "{square}")?,
            Input::Move {
                from,
                to,
                promotion,
            } => {
                write!(f, "{from}{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, " ({promotion})")?;
                }
            }
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            s if s.chars().count() <= 2 => Ok(Input::Square(s.parse()?)),
            s => {
                let mut chars = s.chars();
                let mut square = || -> Result<Square, ParseInputError> {
                    let file = chars.next().ok_or(ParseInputError::UnknownCommand)?;
                    let rank = chars.next().ok_or(ParseInputError::UnknownCommand)?;
                    Ok(Square::from_chars(file, rank)?)
                };
                let from = square()?;
                let to = square()?;
                let promotion = match chars.next() {
                    None => None,
                    Some(c) => Some(
                        PieceKind::from_letter(c)
                            .filter(|kind| PieceKind::PROMOTION_CHOICES.contains(kind))
                            .ok_or(ParseInputError::InvalidPromotion(c))?,
                    ),
                };
                if let Some(c) = chars.next() {
                    return Err(ParseInputError::Unexpected(c));
                }
                Ok(Input::Move {
                    from,
                    to,
                    promotion,
                })
            }
        }
    }
}
fn status(game: &GameState) -> String {
    if let Some(end_state) = game.end_state() {
        format!("{end_state}\ntype `restart` to play again")
    } else if game.check_status() == Some(game.side_to_move()) {
        format!("{} plays, in check", game.side_to_move())
    } else {
        format!("{} plays", game.side_to_move())
    }
}
/// Runs the interactive front-end over standard input and output.
pub fn repl() -> io::Result<()> {
    session(stdin().lock(), stdout().lock(), stderr().lock())
}
fn session(input: impl BufRead, mut output: impl Write, mut error: impl Write) -> io::Result<()> {
    let mut lines = input.lines();
    let mut game = GameState::new();
    let mut view = Color::White;
    let mut first_time = true;
    loop {
        let mut info = status(&game);
        if first_time {
            info.push_str("\ntype `help` for instructions");
            first_time = false;
        }
        writeln!(
            output,
            "{}",
            BoardDisplay {
                board: game.board(),
                view,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let text = text?;
            let input = match text.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            debug!("input: {input}");
            match input {
                Input::Help => {
                    writeln!(output, "flip    - flip the board")?;
                    writeln!(output, "restart - reset to starting position")?;
                    writeln!(output, "quit    - quit the game")?;
                    writeln!(output, "e2      - select a piece, or move the selected one")?;
                    writeln!(output, "e2e4    - play the move")?;
                    writeln!(output, "e7e8n   - move and promote")?;
                    writeln!(output, "e1g1    - perform castling")?;
                    continue;
                }
                Input::Flip => view = !view,
                Input::Restart => game = GameState::new(),
                Input::Quit => return Ok(()),
                Input::Square(square) => match game.select(square) {
                    Selection::Selected(destinations) if destinations.is_empty() => {
                        writeln!(error, "Error: {square} has no legal move")?;
                    }
                    Selection::Selected(_) | Selection::Moved(_) => {}
                    Selection::Cleared => {
                        let opponent = !game.side_to_move();
                        if game.end_state().is_none()
                            && game.board()[square].is_some_and(|piece| piece.color == opponent)
                        {
                            writeln!(error, "Error: it is {}'s turn", game.side_to_move())?;
                        }
                    }
                },
                Input::Move {
                    from,
                    to,
                    promotion,
                } => {
                    let outcome = game.apply_move_with_promotion(
                        from,
                        to,
                        promotion.unwrap_or(PieceKind::Queen),
                    );
                    if outcome == MoveOutcome::Unchanged {
                        writeln!(error, "Error: {from}{to} is an invalid move")?;
                        continue;
                    }
                }
            }
            break;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseInputError {
    Square(ParseSquareError),
    InvalidPromotion(char),
    Unexpected(char),
    UnknownCommand,
}
impl From<ParseSquareError> for ParseInputError {
    fn from(value: ParseSquareError) -> Self {
        ParseInputError::Square(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Square(err) => write!(f, "{err}")?,
            ParseInputError::InvalidPromotion(c) => {
                write!(f, "invalid promotion `{c}`, expected one of q, r, b, n")?;
            }
            ParseInputError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
            ParseInputError::UnknownCommand => write!(f, "unknown command")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Square(err) => Some(err),
            ParseInputError::InvalidPromotion(_)
            | ParseInputError::Unexpected(_)
            | ParseInputError::UnknownCommand => None,
        }
    }
}
