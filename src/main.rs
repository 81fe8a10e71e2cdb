#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    env,
    error::Error,
    fmt::{self, Display, Formatter},
    num::ParseIntError,
    process::ExitCode,
    str::FromStr,
};

use chessrules::{
    fuzz::fuzz,
    misc::{split_first_token, strip_prefix_token},
    repl::repl,
};
use log::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Mode {
    Repl,
    Fuzz {
        games: Option<u64>,
        seed: Option<u64>,
    },
}
impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "repl" => Ok(Mode::Repl),
            s => {
                let s = strip_prefix_token(s, "fuzz")
                    .ok_or_else(|| ParseModeError::UnknownMode(s.to_string()))?;
                let (games, s) = split_first_token(s);
                let (seed, rest) = split_first_token(s);
                if !rest.is_empty() {
                    return Err(ParseModeError::Unexpected(rest.to_string()));
                }
                let parse = |token: &str| {
                    (!token.is_empty())
                        .then(|| token.parse::<u64>())
                        .transpose()
                };
                Ok(Mode::Fuzz {
                    games: parse(games)?,
                    seed: parse(seed)?,
                })
            }
        }
    }
}
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseModeError {
    UnknownMode(String),
    Unexpected(String),
    Int(ParseIntError),
}
impl From<ParseIntError> for ParseModeError {
    fn from(value: ParseIntError) -> Self {
        ParseModeError::Int(value)
    }
}
impl Display for ParseModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseModeError::UnknownMode(mode) => {
                write!(f, "unknown mode `{mode}`, expected `repl` or `fuzz [games] [seed]`")?;
            }
            ParseModeError::Unexpected(rest) => write!(f, "unexpected `{rest}`")?,
            ParseModeError::Int(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseModeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseModeError::Int(err) => Some(err),
            ParseModeError::UnknownMode(_) | ParseModeError::Unexpected(_) => None,
        }
    }
}
fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<_> = env::args().skip(1).collect();
    let mode = match args.join(" ").parse() {
        Ok(mode) => mode,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let result: Result<(), Box<dyn Error>> = match mode {
        Mode::Repl => repl().map_err(Into::into),
        Mode::Fuzz { games, seed } => fuzz(games, seed).map(|_| ()).map_err(Into::into),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{Mode, ParseModeError};

    #[test]
    fn parse_mode() {
        assert_eq!("".parse(), Ok(Mode::Repl));
        assert_eq!("repl".parse(), Ok(Mode::Repl));
        assert_eq!(
            "fuzz".parse(),
            Ok(Mode::Fuzz {
                games: None,
                seed: None
            })
        );
        assert_eq!(
            "fuzz 10 42".parse(),
            Ok(Mode::Fuzz {
                games: Some(10),
                seed: Some(42)
            })
        );
        assert_eq!(
            "play".parse::<Mode>(),
            Err(ParseModeError::UnknownMode("play".to_string()))
        );
        assert_eq!(
            "fuzz 1 2 3".parse::<Mode>(),
            Err(ParseModeError::Unexpected("3".to_string()))
        );
        assert!(matches!(
            "fuzz ten".parse::<Mode>(),
            Err(ParseModeError::Int(_))
        ));
    }
}
