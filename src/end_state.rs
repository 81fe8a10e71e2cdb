use std::fmt::{self, Display, Formatter};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndState {
    Checkmate { winner: Color },
    Stalemate,
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Checkmate { winner } => write!(f, "checkmate, {winner} wins")?,
            EndState::Stalemate => write!(f, "stalemate, draw")?,
        }
        Ok(())
    }
}
