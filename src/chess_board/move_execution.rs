use super::{ChessBoard, Move, Piece};
use log::trace;

impl ChessBoard {
    /// Plays `mv` with `piece`, returning the next position.
    ///
    /// The move is expected to come from [`ChessBoard::generate_moves`] on
    /// this board; it is not checked again here. A captured piece is simply
    /// overwritten.
    pub fn apply(&self, mv: Move, piece: Piece) -> ChessBoard {
        trace!("apply {} {}", piece.kind.name(), mv);
        self.with_move(mv, piece)
    }
}
