pub mod fen;
pub mod jump_tables;
pub mod model;
pub use model::{ChessField, Color, Move, MoveKind, Piece, PieceType, Square};

mod chess_board;
mod move_execution;
pub mod move_generation;
pub mod perft;
#[cfg(test)]
pub mod test_utils;
pub use chess_board::ChessBoard;
pub use move_generation::{MoveSets, MoveStrategy};
pub use perft::perft;
