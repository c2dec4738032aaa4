//! Turn and selection tracking driven by "square chosen" events.
//!
//! A [`Session`] is a plain value. [`Session::square_chosen`] consumes the
//! current session and hands back its successor together with an
//! [`Outcome`]; whoever owns the event loop keeps the latest value.

mod status;
pub use status::Status;

use crate::chess_board::{ChessBoard, ChessField, Color, Move, MoveSets, Piece, Square};
use log::debug;
use std::collections::BTreeSet;
use std::fmt;

/// A piece picked by the side to move, waiting for its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub piece: Piece,
    pub origin: ChessField,
    pub moves: MoveSets,
}

impl Selection {
    pub fn legal_moves(&self) -> BTreeSet<Move> {
        self.moves.all()
    }
}

/// What a single `square_chosen` event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No selection was active and the square held no piece of the side to move.
    Ignored,
    /// A piece of the side to move is now selected.
    Selected(Piece),
    /// The selected piece moved; the turn passed to the other side.
    MoveApplied(Move),
    /// The square was not a target of the selected piece; the selection is cleared.
    MoveRejected,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ignored => write!(f, "Ignored"),
            Outcome::Selected(piece) => write!(f, "Selected {} {}", piece.color, piece.kind.name()),
            Outcome::MoveApplied(mv) => write!(f, "Moved {}", mv),
            Outcome::MoveRejected => write!(f, "Invalid Move!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    board: ChessBoard,
    turn: Color,
    selection: Option<Selection>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Standard starting position, white to move, nothing selected.
    pub fn new() -> Self {
        Self::from_position(ChessBoard::initial(), Color::White)
    }

    pub fn from_position(board: ChessBoard, turn: Color) -> Self {
        Self {
            board,
            turn,
            selection: None,
        }
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.selection.is_none()
    }

    /// Targets of the selected piece, empty while idle.
    pub fn current_legal_moves(&self) -> BTreeSet<Move> {
        self.selection.as_ref().map(Selection::legal_moves).unwrap_or_default()
    }

    pub fn status(&self, last_outcome: Option<&Outcome>) -> Status {
        Status {
            turn: self.turn,
            selected: self.selection.as_ref().map(|s| s.piece.kind),
            invalid: matches!(last_outcome, Some(Outcome::MoveRejected)),
        }
    }

    /// Feeds one chosen square into the state machine.
    pub fn square_chosen(self, field: ChessField) -> (Session, Outcome) {
        let Session { board, turn, selection } = self;
        match selection {
            None => Self::select(board, turn, field),
            Some(selection) => Self::complete(board, turn, selection, field),
        }
    }

    fn select(board: ChessBoard, turn: Color, field: ChessField) -> (Session, Outcome) {
        match board.piece_at(field) {
            Square::Occupied(piece) if piece.color == turn => {
                let moves = board.generate_moves(field, piece);
                debug!(
                    "{} selected {} on {} with {} targets",
                    turn,
                    piece.kind.name(),
                    field,
                    moves.len()
                );
                let selection = Selection {
                    piece,
                    origin: field,
                    moves,
                };
                let session = Session {
                    board,
                    turn,
                    selection: Some(selection),
                };
                (session, Outcome::Selected(piece))
            }
            _ => {
                debug!("{} chose {} without a piece to select", turn, field);
                (Session::from_position(board, turn), Outcome::Ignored)
            }
        }
    }

    fn complete(board: ChessBoard, turn: Color, selection: Selection, field: ChessField) -> (Session, Outcome) {
        match selection.moves.move_to(field) {
            Some(mv) => {
                debug!("{} played {}", turn, mv);
                let next = board.apply(mv, selection.piece);
                (Session::from_position(next, turn.opposite()), Outcome::MoveApplied(mv))
            }
            None => {
                debug!("{} rejected: {} is not a target of {}", turn, field, selection.origin);
                (Session::from_position(board, turn), Outcome::MoveRejected)
            }
        }
    }
}
