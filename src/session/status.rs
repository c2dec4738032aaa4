use crate::chess_board::{Color, PieceType};
use std::fmt;

/// The banner a front end shows above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub turn: Color,
    pub selected: Option<PieceType>,
    /// The previous click was rejected.
    pub invalid: bool,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'s turn | ", self.turn)?;
        match (self.invalid, self.selected) {
            (true, _) => write!(f, "Invalid Move!"),
            (false, Some(kind)) => write!(f, "Selected Piece: {}", kind.name()),
            (false, None) => write!(f, "No piece selected"),
        }
    }
}
