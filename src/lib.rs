pub mod chess_board;
pub mod config;
pub mod console;
pub mod error;
pub mod session;

pub use chess_board::{ChessBoard, ChessField, Color, Move, MoveKind, MoveSets, Piece, PieceType, Square};
pub use error::{ChessError, ChessResult};
pub use session::{Outcome, Selection, Session, Status};
