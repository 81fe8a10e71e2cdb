#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_panics_doc,
    reason = "noisy for a small engine"
)]

pub mod attack;
pub mod board;
pub mod board_display;
pub mod castling;
pub mod checkmate;
pub mod color;
pub mod end_state;
pub mod fuzz;
pub mod game;
pub mod legal;
pub mod misc;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod repl;
pub mod square;
